//! Probe outcomes and the aggregate report
//!
//! These types define the JSON body served at `GET /health`.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health of a single downstream service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// Result of one probe against one service
///
/// Created once per probe invocation and never mutated. Failures are data,
/// not errors: an unreachable service yields an `Unhealthy` outcome with a
/// human-readable `error`, never a propagated error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    /// Configured service name
    pub service: String,
    pub status: ServiceStatus,
    /// Base URL the probe targeted
    pub url: String,
    /// Failure detail, present only when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeOutcome {
    /// Build a healthy outcome
    pub fn healthy(service: impl Into<String>, url: impl Into<String>) -> Self {
        ProbeOutcome {
            service: service.into(),
            status: ServiceStatus::Healthy,
            url: url.into(),
            error: None,
        }
    }

    /// Build an unhealthy outcome with a failure description
    pub fn unhealthy(
        service: impl Into<String>,
        url: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        ProbeOutcome {
            service: service.into(),
            status: ServiceStatus::Unhealthy,
            url: url.into(),
            error: Some(error.into()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

/// Overall status across all configured services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateStatus {
    Healthy,
    Degraded,
}

impl AggregateStatus {
    /// Reduce a set of probe outcomes to one status
    ///
    /// Healthy iff every outcome is healthy; an empty set is vacuously
    /// healthy.
    pub fn from_outcomes(outcomes: &[ProbeOutcome]) -> Self {
        if outcomes.iter().all(ProbeOutcome::is_healthy) {
            AggregateStatus::Healthy
        } else {
            AggregateStatus::Degraded
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateStatus::Healthy => "healthy",
            AggregateStatus::Degraded => "degraded",
        }
    }
}

/// One aggregate health report, built per request
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub status: AggregateStatus,
    /// UTC instant stamped after all probes completed
    pub timestamp: DateTime<Utc>,
    /// Exactly one outcome per configured service, in configured order
    pub services: Vec<ProbeOutcome>,
}

impl AggregateReport {
    /// Reduce probe outcomes into a report, stamping the current time
    pub fn from_outcomes(services: Vec<ProbeOutcome>) -> Self {
        AggregateReport {
            status: AggregateStatus::from_outcomes(&services),
            timestamp: Utc::now(),
            services,
        }
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
