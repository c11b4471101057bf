//! HTTP surface for the aggregate health report
//!
//! - `GET /health` - Aggregate report over all configured services
//! - `GET /healthz` - Liveness: is the aggregator process alive?
//! - `GET /metrics` - Prometheus metrics

use crate::checker::{AggregateStatus, HealthAggregator};
use crate::server::metrics::SharedMetrics;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::info;

/// Shared state for the aggregate endpoint
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<HealthAggregator>,
    pub metrics: SharedMetrics,
}

impl AppState {
    pub fn new(aggregator: HealthAggregator, metrics: SharedMetrics) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            metrics,
        }
    }
}

/// Aggregate health handler
///
/// Always answers with a well-formed JSON report: downstream outages are
/// data in the report, never a protocol error to the caller. 200 when every
/// service is healthy, 503 when degraded.
async fn health(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let report = state.aggregator.aggregate().await;

    for outcome in &report.services {
        state.metrics.record_probe(&outcome.service, outcome.is_healthy());
    }
    state
        .metrics
        .record_aggregate(report.status.as_str(), start.elapsed().as_secs_f64());

    let code = match report.status {
        AggregateStatus::Healthy => StatusCode::OK,
        AggregateStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(report)).into_response()
}

/// Liveness probe handler
///
/// Always returns 200 OK - if this responds, the process is alive.
async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Prometheus metrics handler
async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Build the router for the aggregate endpoint
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Run the aggregate server on the specified port
///
/// Bind failure is fatal and propagates to the caller; everything after a
/// successful bind runs until shutdown.
pub async fn run_server(port: u16, state: AppState) -> Result<(), std::io::Error> {
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    // Log after successful bind - server is actually listening
    info!(port = %port, "Health aggregator listening");

    axum::serve(listener, app)
        .await
        .map_err(std::io::Error::other)
}
