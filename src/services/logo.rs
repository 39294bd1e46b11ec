//! Station logo resolution.
//!
//! The resolver walks an ordered, configurable chain of fallback steps and is
//! total: it always produces a non-empty URL, ending at a fixed application
//! icon even when the configured steps all come up empty.

use serde::{Deserialize, Serialize};

use crate::models::LogoConfig;

/// Flag image URLs keyed by both ISO code and English country name.
const COUNTRY_FLAGS: &[(&str, &str, &str)] = &[
    ("FR", "France", "https://flagcdn.com/w320/fr.png"),
    ("BE", "Belgium", "https://flagcdn.com/w320/be.png"),
    ("CH", "Switzerland", "https://flagcdn.com/w320/ch.png"),
    ("LU", "Luxembourg", "https://flagcdn.com/w320/lu.png"),
    ("MC", "Monaco", "https://flagcdn.com/w320/mc.png"),
    ("DE", "Germany", "https://flagcdn.com/w320/de.png"),
    ("IT", "Italy", "https://flagcdn.com/w320/it.png"),
    ("ES", "Spain", "https://flagcdn.com/w320/es.png"),
    ("NL", "Netherlands", "https://flagcdn.com/w320/nl.png"),
    ("GB", "United Kingdom", "https://flagcdn.com/w320/gb.png"),
    ("CA", "Canada", "https://flagcdn.com/w320/ca.png"),
];

/// One step of the logo fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoStep {
    /// Explicit logo attribute, when non-empty
    Attribute,
    /// Country attribute matched case-sensitively against the flag table
    CountryFlag,
    /// Trailing `" | <code>"` marker in the display name
    NameMarker,
    /// Fixed application icon
    Default,
}

/// Resolves a guaranteed non-empty logo URL for a station.
pub struct LogoResolver {
    steps: Vec<LogoStep>,
    default_icon_url: String,
}

impl LogoResolver {
    /// Create a resolver from configuration.
    pub fn new(config: &LogoConfig) -> Self {
        Self {
            steps: config.steps.clone(),
            default_icon_url: config.default_icon_url.clone(),
        }
    }

    /// Resolve a logo URL from the raw attributes; first matching step wins.
    pub fn resolve(&self, logo: &str, country: Option<&str>, name: &str) -> String {
        for step in &self.steps {
            if let Some(url) = self.apply(*step, logo, country, name) {
                return url;
            }
        }
        // Total even when the configured chain omits the default step.
        self.default_icon_url.clone()
    }

    fn apply(
        &self,
        step: LogoStep,
        logo: &str,
        country: Option<&str>,
        name: &str,
    ) -> Option<String> {
        match step {
            // The attribute is returned verbatim, not normalized.
            LogoStep::Attribute => (!logo.trim().is_empty()).then(|| logo.to_string()),
            LogoStep::CountryFlag => country.and_then(flag_url),
            LogoStep::NameMarker => name_marker_code(name).and_then(flag_url),
            LogoStep::Default => Some(self.default_icon_url.clone()),
        }
    }
}

/// Flag image for an ISO code or full English country name, case-sensitive.
fn flag_url(key: &str) -> Option<String> {
    COUNTRY_FLAGS
        .iter()
        .find(|(code, name, _)| *code == key || *name == key)
        .map(|(_, _, url)| (*url).to_string())
}

/// Known country code embedded in a display name as `" | <code>"`.
fn name_marker_code(name: &str) -> Option<&str> {
    name.split(" | ")
        .skip(1)
        .map(str::trim)
        .find(|candidate| COUNTRY_FLAGS.iter().any(|(code, _, _)| code == candidate))
}
