//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::logo::LogoStep;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Directory scrape settings
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Playlist conversion settings
    #[serde(default)]
    pub playlist: PlaylistConfig,

    /// Logo resolution settings
    #[serde(default)]
    pub logo: LogoConfig,

    /// Feed document settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Output file locations
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if !self.directory.base_url.starts_with("http") {
            return Err(AppError::validation(
                "directory.base_url must be an http(s) URL",
            ));
        }
        if self.directory.link_marker.trim().is_empty() {
            return Err(AppError::validation("directory.link_marker is empty"));
        }
        if self.directory.host.trim().is_empty() {
            return Err(AppError::validation("directory.host is empty"));
        }
        if self.logo.default_icon_url.trim().is_empty() {
            return Err(AppError::validation("logo.default_icon_url is empty"));
        }
        if self.feed.file_name.trim().is_empty() {
            return Err(AppError::validation("feed.file_name is empty"));
        }
        Ok(())
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Directory scrape settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// URL of the directory listing page
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Substring identifying detail-page links
    #[serde(default = "defaults::link_marker")]
    pub link_marker: String,

    /// Host a detail-page link must belong to
    #[serde(default = "defaults::host")]
    pub host: String,

    /// Substrings marking a URL as an unrelated host, not a stream
    #[serde(default = "defaults::denylist")]
    pub denylist: Vec<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            link_marker: defaults::link_marker(),
            host: defaults::host(),
            denylist: defaults::denylist(),
        }
    }
}

/// Playlist conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// Default playlist file path (overridable on the command line)
    #[serde(default = "defaults::playlist_path")]
    pub path: String,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            path: defaults::playlist_path(),
        }
    }
}

/// Logo resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoConfig {
    /// Active fallback steps, applied in order
    #[serde(default = "defaults::logo_steps")]
    pub steps: Vec<LogoStep>,

    /// Fixed application icon used when every other step comes up empty
    #[serde(default = "defaults::default_icon_url")]
    pub default_icon_url: String,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            steps: defaults::logo_steps(),
            default_icon_url: defaults::default_icon_url(),
        }
    }
}

/// Feed document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Channel title
    #[serde(default = "defaults::feed_title")]
    pub title: String,

    /// Channel description
    #[serde(default = "defaults::feed_description")]
    pub description: String,

    /// Channel link
    #[serde(default = "defaults::feed_link")]
    pub link: String,

    /// Channel language code
    #[serde(default = "defaults::feed_language")]
    pub language: String,

    /// Optional channel image URL
    #[serde(default)]
    pub image: Option<String>,

    /// Output directory for the feed document
    #[serde(default = "defaults::feed_output_dir")]
    pub output_dir: String,

    /// Feed document file name
    #[serde(default = "defaults::feed_file_name")]
    pub file_name: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: defaults::feed_title(),
            description: defaults::feed_description(),
            link: defaults::feed_link(),
            language: defaults::feed_language(),
            image: None,
            output_dir: defaults::feed_output_dir(),
            file_name: defaults::feed_file_name(),
        }
    }
}

/// Output file locations for the directory scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON summary file path
    #[serde(default = "defaults::json_path")]
    pub json_path: String,

    /// CSV summary file path
    #[serde(default = "defaults::csv_path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: defaults::json_path(),
            csv_path: defaults::csv_path(),
        }
    }
}

mod defaults {
    use crate::services::logo::LogoStep;

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn request_delay() -> u64 {
        1000
    }

    // Directory defaults
    pub fn base_url() -> String {
        "https://fluxradios.blogspot.com/".into()
    }
    pub fn link_marker() -> String {
        "flux-url-".into()
    }
    pub fn host() -> String {
        "fluxradios.blogspot.com".into()
    }
    pub fn denylist() -> Vec<String> {
        vec![
            "facebook".into(),
            "twitter".into(),
            "google".into(),
            "blogger".into(),
            "youtube".into(),
        ]
    }

    // Playlist defaults
    pub fn playlist_path() -> String {
        "playlist.m3u".into()
    }

    // Logo defaults
    pub fn logo_steps() -> Vec<LogoStep> {
        vec![LogoStep::Attribute, LogoStep::CountryFlag, LogoStep::Default]
    }
    pub fn default_icon_url() -> String {
        "https://cdn-icons-png.flaticon.com/512/2995/2995101.png".into()
    }

    // Feed defaults
    pub fn feed_title() -> String {
        "French Radio Stations".into()
    }
    pub fn feed_description() -> String {
        "Collection of French radio stations for continuous streaming".into()
    }
    pub fn feed_link() -> String {
        "https://example.com/radio".into()
    }
    pub fn feed_language() -> String {
        "fr".into()
    }
    pub fn feed_output_dir() -> String {
        "radio_feeds".into()
    }
    pub fn feed_file_name() -> String {
        "french_radio_stations.xml".into()
    }

    // Output defaults
    pub fn json_path() -> String {
        "flux_radios_data.json".into()
    }
    pub fn csv_path() -> String {
        "flux_radios_data.csv".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.directory.base_url = "ftp://example.com/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [http]
            timeout_secs = 5

            [feed]
            title = "Test Stations"
            "#,
        )
        .unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert!(!config.http.user_agent.is_empty());
        assert_eq!(config.feed.title, "Test Stations");
        assert_eq!(config.feed.language, "fr");
        assert_eq!(config.output.csv_path, "flux_radios_data.csv");
    }

    #[test]
    fn logo_steps_parse_from_kebab_case() {
        let config: Config = toml::from_str(
            r#"
            [logo]
            steps = ["attribute", "country-flag", "name-marker", "default"]
            "#,
        )
        .unwrap();
        assert_eq!(config.logo.steps.len(), 4);
        assert_eq!(config.logo.steps[2], LogoStep::NameMarker);
    }
}
