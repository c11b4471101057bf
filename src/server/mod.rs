//! HTTP server for the aggregate health endpoint
//!
//! Serves the fan-in result plus the aggregator's own probes:
//! - `/health` - aggregate report over the configured services
//! - `/healthz` - liveness of the aggregator process itself
//! - `/metrics` - Prometheus metrics

mod health;
pub mod metrics;

pub use health::{create_router, run_server, AppState};
pub use metrics::{create_metrics, AggregatorMetrics, SharedMetrics};

#[cfg(test)]
#[path = "health_test.rs"]
mod tests;
