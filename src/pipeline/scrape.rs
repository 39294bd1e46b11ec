// src/pipeline/scrape.rs

//! Directory scrape pipeline.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{Config, RadioCandidate};
use crate::services::DirectoryScraper;
use crate::storage;
use crate::utils::http;

/// Run the directory scrape and persist the results.
pub async fn run_scrape(config: &Config) -> Result<()> {
    log::info!("Starting directory scrape of {}", config.directory.base_url);

    let client = http::create_client(&config.http)?;
    let scraper = DirectoryScraper::new(&client, &config.directory, &config.http);
    let candidates = scraper.scrape_all().await?;

    if candidates.is_empty() {
        log::warn!("No radio data extracted");
        return Ok(());
    }

    storage::write_json(&config.output.json_path, &candidates)?;
    log::info!("Data saved to {}", config.output.json_path);

    storage::write_csv(&config.output.csv_path, &candidates)?;
    log::info!("Data saved to {}", config.output.csv_path);

    print_summary(&candidates);

    Ok(())
}

/// Log the extraction summary: totals, quality distribution, first samples.
fn print_summary(candidates: &[RadioCandidate]) {
    log::info!("Total radios with streams: {}", candidates.len());

    let mut by_quality: BTreeMap<String, usize> = BTreeMap::new();
    for candidate in candidates {
        if let Some(ref selected) = candidate.selected {
            *by_quality.entry(selected.quality_label()).or_insert(0) += 1;
        }
    }

    log::info!("Quality distribution:");
    for (label, count) in &by_quality {
        log::info!("  {}: {} radios", label, count);
    }

    for candidate in candidates.iter().take(3) {
        log::info!("Sample: {}", candidate.name);
        log::info!("  Title: {}", candidate.title);
        if let Some(ref selected) = candidate.selected {
            log::info!("  Stream: {}", selected.url);
            log::info!("  Quality: {}", selected.quality_label());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SelectedStream;

    #[test]
    fn quality_distribution_groups_by_label() {
        let mk = |bitrate| RadioCandidate {
            page_url: String::new(),
            name: String::new(),
            title: String::new(),
            description: String::new(),
            logo_url: String::new(),
            streams: vec![],
            selected: Some(SelectedStream {
                url: "http://s.example/x".to_string(),
                bitrate_kbps: bitrate,
            }),
        };
        let candidates = vec![mk(128), mk(128), mk(64)];

        let mut by_quality: BTreeMap<String, usize> = BTreeMap::new();
        for candidate in &candidates {
            if let Some(ref selected) = candidate.selected {
                *by_quality.entry(selected.quality_label()).or_insert(0) += 1;
            }
        }
        assert_eq!(by_quality.get("128kbps"), Some(&2));
        assert_eq!(by_quality.get("64kbps"), Some(&1));
    }
}
