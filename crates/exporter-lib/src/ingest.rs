//! Result-file ingestion
//!
//! The recommender writes its scan result to a JSON file; the exporter
//! re-reads it on an interval and pushes it through the configured
//! formatter, recording the outcome in the health registry.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::formatters::FormatterFn;
use crate::health::{components, HealthRegistry};
use crate::metrics::ExporterMetrics;
use crate::models::ScanResult;

/// One ingest cycle: read, parse, run the formatter, record health
///
/// A failed cycle degrades the `ingest` component but leaves the gauges
/// at their last successfully written state; the next successful cycle
/// marks it healthy again.
pub async fn run_export_cycle(
    result_path: &str,
    formatter: FormatterFn,
    metrics: &ExporterMetrics,
    health_registry: &HealthRegistry,
) {
    match load_and_format(result_path, formatter, metrics).await {
        Ok(status) => {
            info!(result_path = %result_path, status = %status, "Export cycle completed");
            health_registry.set_healthy(components::INGEST).await;
        }
        Err(err) => {
            warn!(result_path = %result_path, error = %format!("{err:#}"), "Export cycle failed");
            health_registry
                .set_degraded(components::INGEST, format!("{err:#}"))
                .await;
        }
    }
}

/// Read and parse the result file, then run the formatter over it
pub async fn load_and_format(
    result_path: &str,
    formatter: FormatterFn,
    metrics: &ExporterMetrics,
) -> Result<String> {
    let raw = tokio::fs::read_to_string(result_path)
        .await
        .with_context(|| format!("reading scan result {result_path:?}"))?;
    let result: ScanResult = serde_json::from_str(&raw)
        .with_context(|| format!("parsing scan result {result_path:?}"))?;

    formatter(&result, metrics)
}
