//! Gauge registry for recommendation metrics
//!
//! Owns the Prometheus registry and the fixed set of labeled gauges the
//! exporter writes into. Constructed once at process start and passed by
//! reference into the export path; tests construct their own instance
//! instead of sharing process-global state.

use prometheus::{GaugeVec, Opts, Registry};

/// Label schema shared by every per-controller gauge, in declared order
pub const CONTROLLER_LABELS: &[&str] = &[
    "cluster",
    "dc",
    "env",
    "namespace",
    "kind",
    "name",
    "container",
];

/// Controller labels plus the resource type
pub const RESOURCE_LABELS: &[&str] = &[
    "cluster",
    "dc",
    "env",
    "namespace",
    "kind",
    "name",
    "container",
    "resource",
];

/// Reference price of one CPU core hour, used by cost dashboards
const CPU_PRICE_PER_CORE_HOUR: f64 = 0.056088;

/// Yearly CO2-equivalent of one idle CPU core, in kg
const CPU_IDLE_YEARLY_EMISSION_KG: f64 = 56.0 * 14.0;

/// Datacenter the reference constants apply to
const REFERENCE_DC: &str = "dc1";

/// The gauges the exporter maintains
///
/// Metric names and label key sets are a compatibility surface for the
/// dashboards that scrape them; changing either needs a version note.
pub struct ExporterMetrics {
    registry: Registry,
    pub instance_count: GaugeVec,
    pub overall_score: GaugeVec,
    pub resource_request_score: GaugeVec,
    pub resource_request_current: GaugeVec,
    pub resource_request_recommended: GaugeVec,
    pub cpu_price: GaugeVec,
    pub cpu_emission: GaugeVec,
}

impl ExporterMetrics {
    /// Create the gauge set backed by a fresh registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let instance_count = register_gauge(
            &registry,
            "krr_controller_instance_count",
            "Count of non-deleted pods backing the controller",
            CONTROLLER_LABELS,
        )?;

        let overall_score = register_gauge(
            &registry,
            "krr_controller_overall_score",
            "Ordinal overall severity of the controller scan",
            CONTROLLER_LABELS,
        )?;

        let resource_request_score = register_gauge(
            &registry,
            "krr_controller_resource_request_score",
            "Ordinal severity of one resource's recommendation",
            RESOURCE_LABELS,
        )?;

        let resource_request_current = register_gauge(
            &registry,
            "krr_controller_resource_request_current",
            "Currently allocated request for one resource, -1 if unset",
            RESOURCE_LABELS,
        )?;

        let resource_request_recommended = register_gauge(
            &registry,
            "krr_controller_resource_request_recommended",
            "Recommended request for one resource, -1 if unset",
            RESOURCE_LABELS,
        )?;

        let cpu_price = register_gauge(
            &registry,
            "krr_cpu_price",
            "Reference price of one CPU core hour per datacenter",
            &["dc"],
        )?;

        let cpu_emission = register_gauge(
            &registry,
            "krr_cpu_idle_yearly_emission",
            "Yearly CO2-equivalent of one idle CPU core per datacenter",
            &["dc"],
        )?;

        // Static reference constants, set once and never touched by the
        // per-result export path.
        cpu_price
            .with_label_values(&[REFERENCE_DC])
            .set(CPU_PRICE_PER_CORE_HOUR);
        cpu_emission
            .with_label_values(&[REFERENCE_DC])
            .set(CPU_IDLE_YEARLY_EMISSION_KG);

        Ok(Self {
            registry,
            instance_count,
            overall_score,
            resource_request_score,
            resource_request_current,
            resource_request_recommended,
            cpu_price,
            cpu_emission,
        })
    }

    /// Collect every registered metric family for text exposition
    pub fn gather(&self) -> Vec<prometheus::proto::MetricFamily> {
        self.registry.gather()
    }
}

fn register_gauge(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> prometheus::Result<GaugeVec> {
    let gauge = GaugeVec::new(Opts::new(name, help), labels)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}
