//! Integration tests for result-file ingestion

use exporter_lib::{
    formatters::{FormatterFn, FormatterRegistry},
    health::{components, HealthRegistry},
    ingest::{load_and_format, run_export_cycle},
    ComponentStatus, ExporterMetrics,
};
use std::io::Write;
use tempfile::NamedTempFile;

const RESULT_JSON: &str = r#"{
    "scans": [{
        "object": {
            "cluster": "prod-us1.staging",
            "namespace": "default",
            "kind": "Deployment",
            "name": "web",
            "container": "app",
            "pods": [
                {"name": "web-1", "deleted": false},
                {"name": "web-2", "deleted": false},
                {"name": "web-3", "deleted": true}
            ],
            "allocations": {
                "requests": {"CPU": null, "Memory": 268435456}
            }
        },
        "severity": "WARNING",
        "recommended": {
            "requests": {
                "CPU": {"value": 0.25, "severity": "CRITICAL"},
                "Memory": {"value": null, "severity": "OK"}
            }
        }
    }]
}"#;

fn metrics_formatter() -> FormatterFn {
    FormatterRegistry::with_defaults().get("metrics").unwrap()
}

fn result_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file.flush().unwrap();
    file
}

async fn ingest_status(health_registry: &HealthRegistry) -> ComponentStatus {
    health_registry.health().await.components[components::INGEST].status
}

#[tokio::test]
async fn test_cycle_exports_file_and_marks_ingest_healthy() {
    let file = result_file(RESULT_JSON);
    let metrics = ExporterMetrics::new().unwrap();
    let health_registry = HealthRegistry::new();
    health_registry.register(components::INGEST).await;

    run_export_cycle(
        file.path().to_str().unwrap(),
        metrics_formatter(),
        &metrics,
        &health_registry,
    )
    .await;

    assert_eq!(ingest_status(&health_registry).await, ComponentStatus::Healthy);
    assert_eq!(
        metrics
            .instance_count
            .with_label_values(&[
                "prod",
                "us1",
                "staging",
                "default",
                "Deployment",
                "web",
                "app"
            ])
            .get(),
        2.0
    );
}

#[tokio::test]
async fn test_cycle_missing_file_degrades_ingest() {
    let metrics = ExporterMetrics::new().unwrap();
    let health_registry = HealthRegistry::new();
    health_registry.register(components::INGEST).await;

    run_export_cycle(
        "/nonexistent/result.json",
        metrics_formatter(),
        &metrics,
        &health_registry,
    )
    .await;

    assert_eq!(ingest_status(&health_registry).await, ComponentStatus::Degraded);

    let health = health_registry.health().await;
    let message = health.components[components::INGEST]
        .message
        .as_deref()
        .unwrap();
    assert!(message.contains("reading scan result"));
}

#[tokio::test]
async fn test_cycle_malformed_json_degrades_then_recovers() {
    let file = result_file("{\"scans\": [");
    let path = file.path().to_str().unwrap().to_string();
    let metrics = ExporterMetrics::new().unwrap();
    let health_registry = HealthRegistry::new();
    health_registry.register(components::INGEST).await;

    run_export_cycle(&path, metrics_formatter(), &metrics, &health_registry).await;
    assert_eq!(ingest_status(&health_registry).await, ComponentStatus::Degraded);

    let health = health_registry.health().await;
    let message = health.components[components::INGEST]
        .message
        .as_deref()
        .unwrap();
    assert!(message.contains("parsing scan result"));

    // The next good cycle clears the degradation
    std::fs::write(&path, RESULT_JSON).unwrap();
    run_export_cycle(&path, metrics_formatter(), &metrics, &health_registry).await;
    assert_eq!(ingest_status(&health_registry).await, ComponentStatus::Healthy);
}

#[tokio::test]
async fn test_load_and_format_returns_confirmation() {
    let file = result_file(RESULT_JSON);
    let metrics = ExporterMetrics::new().unwrap();

    let status = load_and_format(
        file.path().to_str().unwrap(),
        metrics_formatter(),
        &metrics,
    )
    .await
    .unwrap();

    assert_eq!(status, "updated metrics");
}

#[tokio::test]
async fn test_failed_cycle_keeps_previous_gauge_values() {
    let file = result_file(RESULT_JSON);
    let path = file.path().to_str().unwrap().to_string();
    let metrics = ExporterMetrics::new().unwrap();
    let health_registry = HealthRegistry::new();
    health_registry.register(components::INGEST).await;

    run_export_cycle(&path, metrics_formatter(), &metrics, &health_registry).await;

    // Corrupt the file; gauges stay at the last written state
    std::fs::write(&path, "not json").unwrap();
    run_export_cycle(&path, metrics_formatter(), &metrics, &health_registry).await;

    assert_eq!(ingest_status(&health_registry).await, ComponentStatus::Degraded);
    assert_eq!(
        metrics
            .overall_score
            .with_label_values(&[
                "prod",
                "us1",
                "staging",
                "default",
                "Deployment",
                "web",
                "app"
            ])
            .get(),
        1.0
    );
}
