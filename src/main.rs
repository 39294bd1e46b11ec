// src/main.rs

//! radioflux CLI
//!
//! Two independent pipelines behind subcommands: `scrape` extracts radio
//! station metadata from the directory site, `feed` converts a playlist file
//! into an RSS feed document.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use radioflux::{error::Result, models::Config, pipeline};

/// radioflux - Radio station metadata extractor and feed builder
#[derive(Parser, Debug)]
#[command(
    name = "radioflux",
    version,
    about = "Radio station metadata extractor and feed builder"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the radio directory and write JSON/CSV summaries
    Scrape {
        /// Override the JSON output path
        #[arg(long)]
        json: Option<String>,

        /// Override the CSV output path
        #[arg(long)]
        csv: Option<String>,
    },

    /// Convert a playlist file into an RSS feed document
    Feed {
        /// Playlist file (defaults to the configured path)
        playlist: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Scrape { json, csv } => {
            if let Some(path) = json {
                config.output.json_path = path;
            }
            if let Some(path) = csv {
                config.output.csv_path = path;
            }
            pipeline::run_scrape(&config).await?;
        }

        Command::Feed { playlist } => {
            let path = playlist.unwrap_or_else(|| PathBuf::from(&config.playlist.path));
            pipeline::run_convert(&config, &path)?;
        }

        Command::Validate => pipeline::run_validate(&config)?,
    }

    Ok(())
}
