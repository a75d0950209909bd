//! Mapping of scan results onto the gauge set
//!
//! One-shot, synchronous: walks the scans in order and overwrites the
//! gauge value for each scan's label tuple. Repeated exports of the same
//! result are idempotent; a changed scan overwrites only its own tuples.

use thiserror::Error;
use tracing::{debug, warn};

use crate::cluster::{ClusterName, ClusterNameError};
use crate::metrics::ExporterMetrics;
use crate::models::{ResourceType, ResourceValue, ScanResult, Severity};

/// Gauge value standing in for "no numeric data"
pub const UNSET_SENTINEL: f64 = -1.0;

/// Confirmation string returned after a completed export
pub const EXPORT_CONFIRMATION: &str = "updated metrics";

/// What to do with a scan whose cluster identifier does not decompose
///
/// `Abort` fails the whole call on the first malformed scan and leaves
/// gauges at their last successfully written state. `Skip` logs the scan
/// and continues with the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedClusterPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    ClusterName(#[from] ClusterNameError),
}

/// Update every gauge in `metrics` from `result`
///
/// Side effects are entirely the gauge mutations; the returned string is
/// a log line, not a machine-readable contract. Callers that need the
/// computed values read the registry.
pub fn export(
    result: &ScanResult,
    metrics: &ExporterMetrics,
    policy: MalformedClusterPolicy,
) -> Result<&'static str, ExportError> {
    for scan in &result.scans {
        let location = match ClusterName::parse(&scan.object.cluster) {
            Ok(location) => location,
            Err(err) => match policy {
                MalformedClusterPolicy::Abort => return Err(err.into()),
                MalformedClusterPolicy::Skip => {
                    warn!(
                        cluster = %scan.object.cluster,
                        namespace = %scan.object.namespace,
                        name = %scan.object.name,
                        "Skipping scan with malformed cluster identifier"
                    );
                    continue;
                }
            },
        };

        let object = &scan.object;
        let controller_labels = [
            location.cluster.as_str(),
            location.dc.as_str(),
            location.env.as_str(),
            object.namespace.as_str(),
            object.kind.as_str(),
            object.name.as_str(),
            object.container.as_str(),
        ];

        let live_pods = object.pods.iter().filter(|pod| !pod.deleted).count();
        metrics
            .instance_count
            .with_label_values(&controller_labels)
            .set(live_pods as f64);

        metrics
            .overall_score
            .with_label_values(&controller_labels)
            .set(scan.severity.score() as f64);

        for resource in ResourceType::ALL {
            let mut resource_labels = controller_labels.to_vec();
            resource_labels.push(resource.as_str());

            // A resource the recommender did not report behaves like an
            // unset one: unscored severity, sentinel values.
            let recommendation = scan.recommended.requests.get(&resource);

            let severity = recommendation.map_or(Severity::Unknown, |r| r.severity);
            metrics
                .resource_request_score
                .with_label_values(&resource_labels)
                .set(severity.score() as f64);

            let current = object
                .allocations
                .requests
                .get(&resource)
                .copied()
                .unwrap_or(ResourceValue::Unset);
            metrics
                .resource_request_current
                .with_label_values(&resource_labels)
                .set(gauge_value(current));

            let recommended = recommendation.map_or(ResourceValue::Unset, |r| r.value);
            metrics
                .resource_request_recommended
                .with_label_values(&resource_labels)
                .set(gauge_value(recommended));
        }

        debug!(
            cluster = %object.cluster,
            namespace = %object.namespace,
            kind = %object.kind,
            name = %object.name,
            container = %object.container,
            severity = ?scan.severity,
            "Exported scan"
        );
    }

    Ok(EXPORT_CONFIRMATION)
}

fn gauge_value(value: ResourceValue) -> f64 {
    value.as_f64().unwrap_or(UNSET_SENTINEL)
}
