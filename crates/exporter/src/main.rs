//! krr-exporter - recommendation scan metrics exporter
//!
//! Watches the scan-result file written by the recommendation engine
//! and republishes it as labeled Prometheus gauges.

use anyhow::{anyhow, Result};
use exporter_lib::{
    formatters::{FormatterFn, FormatterRegistry},
    health::{components, HealthRegistry},
    ingest::run_export_cycle,
    ExporterMetrics,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting krr-exporter");

    // Load configuration
    let config = config::ExporterConfig::load()?;
    info!(
        result_path = %config.result_path,
        formatter = %config.formatter,
        "Exporter configured"
    );

    // Compose the formatter dispatch table and pick the configured one
    let formatters = FormatterRegistry::with_defaults();
    let formatter = formatters.get(&config.formatter).ok_or_else(|| {
        anyhow!(
            "unknown formatter {:?}, available: {:?}",
            config.formatter,
            formatters.names()
        )
    })?;

    // Initialize the gauge registry
    let metrics = Arc::new(ExporterMetrics::new()?);

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::INGEST).await;
    health_registry.register(components::HTTP_API).await;

    let app_state = Arc::new(api::AppState::new(
        health_registry.clone(),
        metrics.clone(),
    ));

    // Start health and metrics server; a server failure (e.g. the port
    // is already bound) marks the http_api component unhealthy
    let api_handle = tokio::spawn({
        let health_registry = health_registry.clone();
        let port = config.listen_port;
        async move {
            if let Err(err) = api::serve(port, app_state).await {
                health_registry
                    .set_unhealthy(components::HTTP_API, format!("{err:#}"))
                    .await;
            }
        }
    });

    // Run the first ingest before marking ready so a scrape after
    // readiness sees populated gauges
    run_export_cycle(&config.result_path, formatter, &metrics, &health_registry).await;
    health_registry.set_ready(true).await;

    let ingest_handle = tokio::spawn(ingest_loop(
        config.clone(),
        formatter,
        metrics.clone(),
        health_registry.clone(),
    ));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    ingest_handle.abort();
    api_handle.abort();

    Ok(())
}

/// Re-read and re-export the result file on a fixed interval
async fn ingest_loop(
    config: config::ExporterConfig,
    formatter: FormatterFn,
    metrics: Arc<ExporterMetrics>,
    health_registry: HealthRegistry,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(config.rescan_interval_secs));
    interval.tick().await; // first tick fires immediately; already ingested at startup

    loop {
        interval.tick().await;
        run_export_cycle(&config.result_path, formatter, &metrics, &health_registry).await;
    }
}
