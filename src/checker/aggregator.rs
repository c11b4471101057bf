//! Fan-out/fan-in aggregation over the configured service map

use crate::checker::probe::ServiceProber;
use crate::checker::report::{AggregateReport, ProbeOutcome};
use crate::config::ServiceEndpoint;
use futures::future::join_all;
use std::future::Future;
use tracing::{debug, error, info};

/// Probes every configured service concurrently and reduces the outcomes
/// into one [`AggregateReport`]
///
/// The service map is fixed at construction and never mutated; each
/// `aggregate` call is a single pass with no retries and no state.
#[derive(Clone)]
pub struct HealthAggregator {
    services: Vec<ServiceEndpoint>,
    prober: ServiceProber,
}

impl HealthAggregator {
    /// Create an aggregator over the configured service map
    pub fn new(services: Vec<ServiceEndpoint>, prober: ServiceProber) -> Self {
        Self { services, prober }
    }

    /// Names of the configured services, in configured order
    pub fn service_names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name.as_str()).collect()
    }

    /// Run one probe per service concurrently and reduce the outcomes
    ///
    /// Waits for every probe: a slow or failing service never suppresses the
    /// outcomes of its siblings, and each probe carries its own timeout, so
    /// wall time is bounded by the slowest single probe rather than the sum.
    /// The report always holds exactly one outcome per configured service,
    /// in configured order.
    pub async fn aggregate(&self) -> AggregateReport {
        let prober = self.prober.clone();
        self.aggregate_with(move |endpoint| {
            let prober = prober.clone();
            async move { prober.probe(&endpoint.name, &endpoint.base_url).await }
        })
        .await
    }

    /// Fan out one spawned task per service using `probe_fn` and fan in
    ///
    /// Split out from [`aggregate`](Self::aggregate) so the task-failure
    /// path can be driven with a probe function that panics.
    async fn aggregate_with<F, Fut>(&self, probe_fn: F) -> AggregateReport
    where
        F: Fn(ServiceEndpoint) -> Fut,
        Fut: Future<Output = ProbeOutcome> + Send + 'static,
    {
        let mut handles = Vec::with_capacity(self.services.len());

        for endpoint in &self.services {
            handles.push(tokio::spawn(probe_fn(endpoint.clone())));
        }

        // join_all preserves spawn order, so outcomes line up with the
        // configured service order regardless of completion order.
        let results = join_all(handles).await;

        let mut outcomes = Vec::with_capacity(self.services.len());
        for (endpoint, result) in self.services.iter().zip(results) {
            let outcome = match result {
                Ok(outcome) => outcome,
                // A panicked probe task still counts as an unhealthy service
                // rather than failing the whole report.
                Err(e) => {
                    error!(service = %endpoint.name, error = %e, "Probe task failed");
                    ProbeOutcome::unhealthy(
                        &endpoint.name,
                        &endpoint.base_url,
                        format!("probe task failed: {}", e),
                    )
                }
            };
            outcomes.push(outcome);
        }

        let report = AggregateReport::from_outcomes(outcomes);

        let unhealthy = report.services.iter().filter(|o| !o.is_healthy()).count();
        if unhealthy == 0 {
            debug!(services = report.services.len(), "All services healthy");
        } else {
            info!(
                services = report.services.len(),
                unhealthy = unhealthy,
                "Aggregate degraded"
            );
        }

        report
    }
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;
