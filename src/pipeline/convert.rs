// src/pipeline/convert.rs

//! Playlist-to-feed conversion pipeline.

use std::fs;
use std::path::Path;

use chrono::Utc;

use crate::error::Result;
use crate::feed::{build_feed, render_feed};
use crate::models::{Config, StationRecord};
use crate::services::{LogoResolver, playlist};
use crate::storage;

/// Parse a playlist file, resolve station logos, and write the feed document.
pub fn run_convert(config: &Config, playlist_path: &Path) -> Result<()> {
    log::info!("Parsing playlist {}", playlist_path.display());
    let content = fs::read_to_string(playlist_path)?;

    let resolver = LogoResolver::new(&config.logo);
    let stations: Vec<StationRecord> = playlist::parse_playlist(&content)
        .into_iter()
        .map(|station| {
            let logo_url =
                resolver.resolve(&station.logo_url, station.country.as_deref(), &station.name);
            StationRecord {
                logo_url,
                ..station
            }
        })
        .collect();

    log::info!("Parsed {} stations", stations.len());

    let document = build_feed(&stations, &config.feed, Utc::now());
    let xml = render_feed(&document)?;
    let path = storage::write_feed(&config.feed.output_dir, &config.feed.file_name, &xml)?;

    log::info!("Generated feed: {}", path.display());
    log::info!("To use this feed in a podcast client:");
    log::info!("  1. Host the XML file on a web server");
    log::info!("  2. Add it by URL as a new podcast subscription");
    log::info!("  3. Every station appears as an episode of that podcast");

    Ok(())
}
