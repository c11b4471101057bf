pub mod checker;
pub mod config;
pub mod server;

// Re-export for main.rs and tests
pub use crate::checker::{AggregateReport, AggregateStatus, HealthAggregator, ServiceProber};
pub use crate::config::{ServiceEndpoint, Settings};
