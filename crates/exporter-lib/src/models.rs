//! Data model for recommendation scan results
//!
//! These types mirror the JSON the recommendation engine emits after a
//! scan. They are read-only inputs to the exporter and are discarded
//! once the gauges have been updated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Output of one recommender run: an ordered list of scans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub scans: Vec<Scan>,
}

/// One assessment of one workload container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scan {
    pub object: ControllerObject,
    pub severity: Severity,
    pub recommended: RecommendationBundle,
}

/// The scanned workload entity (deployment/statefulset-like)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerObject {
    /// Composite cluster identifier, `<cluster>-<dc>.<env>`
    pub cluster: String,
    pub namespace: String,
    pub kind: String,
    pub name: String,
    pub container: String,
    #[serde(default)]
    pub pods: Vec<Pod>,
    pub allocations: ResourceAllocations,
}

/// A pod backing the scanned workload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pod {
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
}

/// Currently configured resource requests, keyed by resource type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceAllocations {
    #[serde(default)]
    pub requests: HashMap<ResourceType, ResourceValue>,
}

/// Recommended resource requests, keyed by resource type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationBundle {
    #[serde(default)]
    pub requests: HashMap<ResourceType, Recommendation>,
}

/// One recommended request with the severity of the deviation it fixes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Recommendation {
    pub value: ResourceValue,
    pub severity: Severity,
}

/// A resource quantity that may be absent
///
/// The recommender emits `null` when a container has no request
/// configured or no recommendation could be computed. The numeric -1
/// sentinel only exists at the gauge boundary; internally absence stays
/// typed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceValue {
    Measured(f64),
    Unset,
}

impl ResourceValue {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            ResourceValue::Measured(v) => Some(v),
            ResourceValue::Unset => None,
        }
    }
}

impl Default for ResourceValue {
    fn default() -> Self {
        ResourceValue::Unset
    }
}

/// Qualitative rating of how far an allocation deviates from the
/// recommendation, worst first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Warning,
    Ok,
    Good,
    /// Catch-all for ratings this version does not know about
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// Ordinal score for numeric comparison and dashboards
    ///
    /// Total over the enum: every known member maps to 0..=3,
    /// `Unknown` maps to the -1 "unscored" sentinel so the exporter
    /// never aborts on an unmapped severity.
    pub fn score(self) -> i64 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Ok => 2,
            Severity::Good => 3,
            Severity::Unknown => -1,
        }
    }
}

/// Resource types the recommender scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "CPU")]
    Cpu,
    Memory,
}

impl ResourceType {
    pub const ALL: [ResourceType; 2] = [ResourceType::Cpu, ResourceType::Memory];

    /// Display name used as the `resource` label value
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Cpu => "CPU",
            ResourceType::Memory => "Memory",
        }
    }
}
