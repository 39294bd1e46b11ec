//! Station record parsed from a playlist entry.

use serde::{Deserialize, Serialize};

/// A radio station parsed from one playlist entry.
///
/// Immutable once built; records are collected in playlist order and
/// duplicates (same URL) are kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationRecord {
    /// Display name
    pub name: String,

    /// Alternate identifier from the `tvg-name` attribute
    pub tvg_name: Option<String>,

    /// Logo URL; raw attribute value until resolution, non-empty afterwards
    pub logo_url: String,

    /// Category from the `group-title` attribute
    pub group: Option<String>,

    /// Raw `tvg-country` attribute, input to logo resolution
    pub country: Option<String>,

    /// Playback URL; non-empty for every record that reaches an output file
    pub stream_url: String,
}
