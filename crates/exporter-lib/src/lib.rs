//! Library for the recommendation metrics exporter
//!
//! This crate provides the core functionality for:
//! - Typed scan-result data model
//! - Cluster identifier decomposition and severity scoring
//! - The Prometheus gauge set and the result-to-gauge export path
//! - Result-file ingestion, formatter dispatch, and health tracking
//!   for the host process

pub mod cluster;
pub mod exporter;
pub mod formatters;
pub mod health;
pub mod ingest;
pub mod metrics;
pub mod models;

pub use cluster::{ClusterName, ClusterNameError};
pub use exporter::{export, ExportError, MalformedClusterPolicy};
pub use formatters::FormatterRegistry;
pub use health::{ComponentHealth, ComponentStatus, HealthRegistry};
pub use metrics::ExporterMetrics;
pub use models::*;
