//! Single-service health probe
//!
//! One bounded-duration `GET {base_url}/health` per call. The probe is a
//! total function: every failure mode (non-200, refused connection, DNS,
//! timeout) is captured in the returned [`ProbeOutcome`], never propagated.

use crate::checker::report::ProbeOutcome;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Per-probe timeout (seconds), measured from call start
const PROBE_TIMEOUT_SECS: u64 = 5;

/// Issues health probes against downstream services
///
/// Holds one shared HTTP client so concurrent probes reuse connections; the
/// client is read-only and carries the probe timeout.
#[derive(Clone)]
pub struct ServiceProber {
    client: Client,
}

impl ServiceProber {
    /// Create a prober with the default 5-second timeout
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
    }

    /// Create a prober with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Probe one service and classify the outcome
    ///
    /// - 200 response: healthy
    /// - any other response: unhealthy, `error = "Status code: <code>"`
    /// - no response (refused, DNS, timeout, protocol): unhealthy with the
    ///   transport error text
    ///
    /// No retries; no state retained between calls.
    pub async fn probe(&self, name: &str, base_url: &str) -> ProbeOutcome {
        let url = format!("{}/health", base_url.trim_end_matches('/'));

        match self.client.get(&url).send().await {
            Ok(response) if response.status().as_u16() == 200 => {
                debug!(service = %name, url = %base_url, "Probe succeeded");
                ProbeOutcome::healthy(name, base_url)
            }
            Ok(response) => {
                let status = response.status().as_u16();
                debug!(service = %name, url = %base_url, status = status, "Probe got non-200");
                ProbeOutcome::unhealthy(name, base_url, format!("Status code: {}", status))
            }
            Err(e) => {
                debug!(service = %name, url = %base_url, error = %e, "Probe failed");
                ProbeOutcome::unhealthy(name, base_url, e.to_string())
            }
        }
    }
}

impl Default for ServiceProber {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "probe_test.rs"]
mod tests;
