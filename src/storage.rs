// src/storage.rs

//! Output file writers.
//!
//! Write failures have no meaningful fallback and propagate as fatal errors.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::RadioCandidate;

/// Fixed column set of the CSV summary.
pub const CSV_HEADER: &str = "name,title,description,page_url,logo_url,stream_url,stream_quality";

/// Write the scraped candidates as a pretty-printed JSON array.
pub fn write_json(path: impl AsRef<Path>, candidates: &[RadioCandidate]) -> Result<()> {
    let json = serde_json::to_string_pretty(candidates)?;
    ensure_parent(path.as_ref())?;
    fs::write(path, json)?;
    Ok(())
}

/// Write the scraped candidates as a flat CSV table.
pub fn write_csv(path: impl AsRef<Path>, candidates: &[RadioCandidate]) -> Result<()> {
    let mut content = String::from(CSV_HEADER);
    content.push('\n');

    for candidate in candidates {
        let (stream_url, quality) = candidate
            .selected
            .as_ref()
            .map(|s| (s.url.clone(), s.quality_label()))
            .unwrap_or_default();

        let row = [
            candidate.name.as_str(),
            candidate.title.as_str(),
            candidate.description.as_str(),
            candidate.page_url.as_str(),
            candidate.logo_url.as_str(),
            stream_url.as_str(),
            quality.as_str(),
        ]
        .map(csv_field)
        .join(",");
        content.push_str(&row);
        content.push('\n');
    }

    ensure_parent(path.as_ref())?;
    fs::write(path, content)?;
    Ok(())
}

/// Write the rendered feed document, creating the output directory if absent.
pub fn write_feed(output_dir: impl AsRef<Path>, file_name: &str, content: &str) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(file_name);
    fs::write(&path, content)?;
    Ok(path)
}

/// Quote a CSV field when it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
