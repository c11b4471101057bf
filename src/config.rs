//! Service map and listener configuration
//!
//! Configuration from environment variables:
//! - VIGIL_SERVICES: comma-separated `name:host:port` triples (default: empty)
//! - VIGIL_PORT: port for the aggregate endpoint (default: 8000)

use thiserror::Error;

/// Default port for the aggregate endpoint
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid service entry '{0}': expected name:host:port")]
    InvalidEntry(String),

    #[error("Duplicate service name '{0}'")]
    DuplicateName(String),

    #[error("Invalid port '{0}'")]
    InvalidPort(String),
}

/// One downstream service to probe
///
/// Immutable for the process lifetime; the service map is built once at
/// startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    /// Unique service name (JSON `service` field in probe outcomes)
    pub name: String,
    /// HTTP origin, e.g. `http://media:8001`; probes GET `{base_url}/health`
    pub base_url: String,
}

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    /// Port the aggregate endpoint listens on
    pub port: u16,
    /// Downstream services in configured order
    ///
    /// A Vec rather than a map: report ordering must match the configured
    /// order, so iteration order has to be deterministic.
    pub services: Vec<ServiceEndpoint>,
}

impl Settings {
    /// Load settings from the environment
    ///
    /// Malformed configuration is a fatal startup error; the service map is
    /// never partially loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("VIGIL_SERVICES").ok().as_deref(),
            std::env::var("VIGIL_PORT").ok().as_deref(),
        )
    }

    /// Build settings from raw variable values
    ///
    /// An unset service list means an empty map; an unset port means the
    /// default port.
    fn from_vars(services: Option<&str>, port: Option<&str>) -> Result<Self, ConfigError> {
        let services = match services {
            Some(raw) => parse_service_map(raw)?,
            None => Vec::new(),
        };

        let port = match port {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?,
            None => DEFAULT_PORT,
        };

        Ok(Settings { port, services })
    }
}

/// Parse a comma-separated list of `name:host:port` triples
///
/// An empty or whitespace-only string yields an empty service map, which is
/// valid (the aggregate is vacuously healthy).
pub fn parse_service_map(raw: &str) -> Result<Vec<ServiceEndpoint>, ConfigError> {
    let mut services: Vec<ServiceEndpoint> = Vec::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let parts: Vec<&str> = entry.split(':').collect();
        let [name, host, port] = parts.as_slice() else {
            return Err(ConfigError::InvalidEntry(entry.to_string()));
        };
        if name.is_empty() || host.is_empty() {
            return Err(ConfigError::InvalidEntry(entry.to_string()));
        }
        port.parse::<u16>()
            .map_err(|_| ConfigError::InvalidEntry(entry.to_string()))?;

        if services.iter().any(|s| s.name == *name) {
            return Err(ConfigError::DuplicateName(name.to_string()));
        }

        services.push(ServiceEndpoint {
            name: name.to_string(),
            base_url: format!("http://{}:{}", host, port),
        });
    }

    Ok(services)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
