//! Radio candidate data structures for the directory scrape.

use serde::{Deserialize, Serialize};

/// One candidate playback URL discovered on a detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamOption {
    /// Candidate stream URL
    pub url: String,

    /// Text surrounding the URL on the page; used only for scoring
    #[serde(skip)]
    pub context: String,

    /// Inferred or defaulted bitrate
    pub bitrate_kbps: u32,
}

/// The stream chosen for a candidate by the best-stream selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedStream {
    pub url: String,
    pub bitrate_kbps: u32,
}

impl SelectedStream {
    /// Quality label of the form `128kbps`.
    pub fn quality_label(&self) -> String {
        format!("{}kbps", self.bitrate_kbps)
    }
}

/// A radio station extracted from one directory detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadioCandidate {
    /// URL of the detail page
    pub page_url: String,

    /// Canonical name derived from the page URL
    pub name: String,

    /// Page title or first suitable heading
    pub title: String,

    /// First relevant paragraphs of the page
    pub description: String,

    /// Logo image URL, empty when none was found
    pub logo_url: String,

    /// All discovered stream options, discovery order
    pub streams: Vec<StreamOption>,

    /// Best stream, when one was selected
    pub selected: Option<SelectedStream>,
}

impl RadioCandidate {
    /// Whether a stream was selected for this candidate.
    pub fn has_stream(&self) -> bool {
        self.selected.is_some()
    }
}
