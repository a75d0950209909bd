//! Exporter configuration

use anyhow::{Context, Result};
use serde::Deserialize;

/// Exporter configuration, environment-driven with the `EXPORTER` prefix
#[derive(Debug, Clone, Deserialize)]
pub struct ExporterConfig {
    /// HTTP port for the metrics/health server
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Path to the scan-result JSON written by the recommender
    #[serde(default = "default_result_path")]
    pub result_path: String,

    /// Formatter to run on each ingested result
    #[serde(default = "default_formatter")]
    pub formatter: String,

    /// How often to re-read the result file, in seconds
    #[serde(default = "default_rescan_interval")]
    pub rescan_interval_secs: u64,
}

fn default_listen_port() -> u16 {
    8080
}

fn default_result_path() -> String {
    "result.json".to_string()
}

fn default_formatter() -> String {
    "metrics".to_string()
}

fn default_rescan_interval() -> u64 {
    60
}

impl ExporterConfig {
    /// Load configuration from the environment
    ///
    /// A malformed variable (e.g. a non-numeric port) is an error, not
    /// a silent fall back to defaults.
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("EXPORTER"))
            .build()?;

        config
            .try_deserialize()
            .context("invalid EXPORTER_* environment")
    }
}
