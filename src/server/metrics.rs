//! Prometheus metrics for the aggregator
//!
//! Exposes probe and aggregation activity:
//! - Per-service probe results
//! - Aggregate check counts by outcome
//! - Aggregation latency

use prometheus::{
    self, Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Aggregator metrics registry
///
/// Thread-safe container for all Prometheus metrics.
/// Clone is cheap (Arc internally).
#[derive(Clone)]
pub struct AggregatorMetrics {
    registry: Registry,
    /// Probe results by service and result (healthy, unhealthy)
    pub probes_total: IntCounterVec,
    /// Aggregate checks by overall status (healthy, degraded)
    pub aggregate_checks_total: IntCounterVec,
    /// Wall time of one full fan-out/fan-in pass in seconds
    pub aggregate_duration_seconds: Histogram,
}

impl AggregatorMetrics {
    /// Create a new metrics registry with all aggregator metrics
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let probes_total = IntCounterVec::new(
            Opts::new("vigil_probes_total", "Total number of service probes"),
            &["service", "result"],
        )?;
        registry.register(Box::new(probes_total.clone()))?;

        let aggregate_checks_total = IntCounterVec::new(
            Opts::new(
                "vigil_aggregate_checks_total",
                "Total number of aggregate health checks",
            ),
            &["status"], // healthy, degraded
        )?;
        registry.register(Box::new(aggregate_checks_total.clone()))?;

        let aggregate_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "vigil_aggregate_duration_seconds",
                "Duration of one aggregate check in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        )?;
        registry.register(Box::new(aggregate_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            probes_total,
            aggregate_checks_total,
            aggregate_duration_seconds,
        })
    }

    /// Record the result of one probe
    pub fn record_probe(&self, service: &str, healthy: bool) {
        let result = if healthy { "healthy" } else { "unhealthy" };
        self.probes_total.with_label_values(&[service, result]).inc();
    }

    /// Record one full aggregate check
    pub fn record_aggregate(&self, status: &str, duration_secs: f64) {
        self.aggregate_checks_total
            .with_label_values(&[status])
            .inc();
        self.aggregate_duration_seconds.observe(duration_secs);
    }

    /// Encode all metrics to Prometheus text format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            prometheus::Error::Msg(format!("Failed to encode metrics as UTF-8: {}", e))
        })
    }
}

/// Shared metrics handle for use across the server
pub type SharedMetrics = Arc<AggregatorMetrics>;

/// Create a new shared metrics instance
pub fn create_metrics() -> Result<SharedMetrics, prometheus::Error> {
    Ok(Arc::new(AggregatorMetrics::new()?))
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
