// src/models/mod.rs

//! Domain models for the radioflux application.

mod config;
mod radio;
mod station;

// Re-export all public types
pub use config::{
    Config, DirectoryConfig, FeedConfig, HttpConfig, LogoConfig, OutputConfig, PlaylistConfig,
};
pub use radio::{RadioCandidate, SelectedStream, StreamOption};
pub use station::StationRecord;
