//! Pipeline entry points, one per CLI subcommand.
//!
//! - `run_scrape`: scrape the radio directory into JSON/CSV summaries
//! - `run_convert`: convert a playlist file into an RSS feed document
//! - `run_validate`: check the configuration and report effective settings

pub mod convert;
pub mod scrape;
pub mod validate;

pub use convert::run_convert;
pub use scrape::run_scrape;
pub use validate::run_validate;
