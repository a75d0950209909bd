//! Formatter dispatch table
//!
//! The host decides at composition time which formatters exist; a
//! formatter is a plain function looked up by name, with no registration
//! side effects at import time.

use std::collections::HashMap;

use crate::exporter::{export, MalformedClusterPolicy};
use crate::metrics::ExporterMetrics;
use crate::models::ScanResult;

pub type FormatterFn = fn(&ScanResult, &ExporterMetrics) -> anyhow::Result<String>;

/// Caller-owned table of named formatters
#[derive(Default)]
pub struct FormatterRegistry {
    formatters: HashMap<&'static str, FormatterFn>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the built-in formatters registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("metrics", metrics_formatter);
        registry.register("json", json_formatter);
        registry
    }

    pub fn register(&mut self, name: &'static str, formatter: FormatterFn) {
        self.formatters.insert(name, formatter);
    }

    pub fn get(&self, name: &str) -> Option<FormatterFn> {
        self.formatters.get(name).copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.formatters.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Push the result into the gauge registry
pub fn metrics_formatter(
    result: &ScanResult,
    metrics: &ExporterMetrics,
) -> anyhow::Result<String> {
    let status = export(result, metrics, MalformedClusterPolicy::default())?;
    Ok(status.to_string())
}

/// Dump the result back out as pretty-printed JSON
pub fn json_formatter(result: &ScanResult, _metrics: &ExporterMetrics) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_registered() {
        let registry = FormatterRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["json", "metrics"]);
        assert!(registry.get("metrics").is_some());
        assert!(registry.get("table").is_none());
    }

    #[test]
    fn test_metrics_formatter_returns_confirmation() {
        let metrics = ExporterMetrics::new().unwrap();
        let result = ScanResult { scans: vec![] };

        let formatter = FormatterRegistry::with_defaults().get("metrics").unwrap();
        assert_eq!(formatter(&result, &metrics).unwrap(), "updated metrics");
    }

    #[test]
    fn test_json_formatter_round_trips() {
        let metrics = ExporterMetrics::new().unwrap();
        let result = ScanResult { scans: vec![] };

        let rendered = json_formatter(&result, &metrics).unwrap();
        let parsed: ScanResult = serde_json::from_str(&rendered).unwrap();
        assert!(parsed.scans.is_empty());
    }
}
