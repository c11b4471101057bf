//! Concurrent health-checking engine
//!
//! Fan-out/fan-in over the configured service map:
//! - [`probe`]: one bounded-timeout GET against a single service
//! - [`aggregator`]: runs one probe task per service, waits for all of them,
//!   and reduces the outcomes into one [`AggregateReport`]

pub mod aggregator;
pub mod probe;
pub mod report;

pub use aggregator::HealthAggregator;
pub use probe::ServiceProber;
pub use report::{AggregateReport, AggregateStatus, ProbeOutcome, ServiceStatus};
