// src/pipeline/validate.rs

//! Configuration validation pipeline.

use crate::error::Result;
use crate::models::Config;

/// Validate the configuration and report the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("✓ Config OK");
    log::info!("  User-Agent: {}", config.http.user_agent);
    log::info!("  Timeout: {}s", config.http.timeout_secs);
    log::info!("  Request delay: {}ms", config.http.request_delay_ms);
    log::info!("  Directory: {}", config.directory.base_url);
    log::info!("  Denylist entries: {}", config.directory.denylist.len());
    log::info!("  Logo fallback steps: {}", config.logo.steps.len());
    log::info!("  Feed output: {}/{}", config.feed.output_dir, config.feed.file_name);

    Ok(())
}
