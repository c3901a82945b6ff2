//! unitdrill-reporters: Configuration and score reporting.
//!
//! Loads `unitdrill.toml` and implements the `ScoreReporter` trait for an
//! HTTP webhook, plus a recording mock for tests.

pub mod config;
pub mod error;
pub mod mock;
pub mod webhook;

pub use config::{create_reporter, load_config_from, DrillConfig, ReporterConfig};
pub use error::ReporterError;
pub use webhook::WebhookReporter;
