//! Tests for the aggregate HTTP surface

use super::*;
use crate::checker::{HealthAggregator, ServiceProber};
use crate::config::ServiceEndpoint;
use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

/// Spawn a fake downstream service whose /health returns `status`
async fn spawn_service(status: StatusCode) -> String {
    let app = Router::new().route("/health", get(move || async move { status }));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

/// Spawn the aggregator server over the given services; returns its base URL
async fn spawn_app(services: Vec<ServiceEndpoint>) -> String {
    let aggregator = HealthAggregator::new(services, ServiceProber::new());
    let metrics = create_metrics().expect("create metrics");
    let app = create_router(AppState::new(aggregator, metrics));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

fn endpoint(name: &str, base_url: &str) -> ServiceEndpoint {
    ServiceEndpoint {
        name: name.to_string(),
        base_url: base_url.to_string(),
    }
}

/// All downstreams 200, aggregate answers 200
#[tokio::test]
async fn test_health_returns_200_when_all_healthy() {
    let media = spawn_service(StatusCode::OK).await;
    let core = spawn_service(StatusCode::OK).await;
    let app = spawn_app(vec![endpoint("media", &media), endpoint("core", &core)]).await;

    let response = reqwest::get(format!("{}/health", app))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), 200, "healthy aggregate should be 200");

    let body: serde_json::Value = response.json().await.expect("JSON body");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"].as_array().expect("services array").len(), 2);
    assert_eq!(body["services"][0]["service"], "media");
    assert_eq!(body["services"][0]["status"], "healthy");
    assert!(
        body["services"][0].get("error").is_none(),
        "healthy entries should omit the error field"
    );
    assert!(body["timestamp"].is_string());
}

/// One downstream 500, aggregate answers 503 with a
/// well-formed JSON report
#[tokio::test]
async fn test_health_returns_503_when_degraded() {
    let media = spawn_service(StatusCode::OK).await;
    let core = spawn_service(StatusCode::INTERNAL_SERVER_ERROR).await;
    let app = spawn_app(vec![endpoint("media", &media), endpoint("core", &core)]).await;

    let response = reqwest::get(format!("{}/health", app))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), 503, "degraded aggregate should be 503");

    let body: serde_json::Value = response.json().await.expect("JSON body");
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"][1]["status"], "unhealthy");
    assert_eq!(body["services"][1]["error"], "Status code: 500");
}

/// No configured services
#[tokio::test]
async fn test_health_empty_service_map_is_healthy() {
    let app = spawn_app(vec![]).await;

    let response = reqwest::get(format!("{}/health", app))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("JSON body");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"], serde_json::json!([]));
}

#[tokio::test]
async fn test_healthz_returns_200() {
    let app = spawn_app(vec![]).await;

    let response = reqwest::get(format!("{}/healthz", app))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), 200, "liveness probe should return 200");
}

/// /metrics reflects probe activity after an aggregate check
#[tokio::test]
async fn test_metrics_reports_probe_activity() {
    let media = spawn_service(StatusCode::OK).await;
    let app = spawn_app(vec![endpoint("media", &media)]).await;

    // One aggregate check so the counters have values
    reqwest::get(format!("{}/health", app))
        .await
        .expect("request should succeed");

    let response = reqwest::get(format!("{}/metrics", app))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);

    let content_type = response
        .headers()
        .get("content-type")
        .expect("should have content-type")
        .to_str()
        .expect("content-type should be string");
    assert!(
        content_type.contains("text/plain"),
        "Should be text/plain for Prometheus"
    );

    let body = response.text().await.expect("should have body");
    assert!(body.contains("vigil_probes_total{result=\"healthy\",service=\"media\"} 1"));
    assert!(body.contains("vigil_aggregate_checks_total{status=\"healthy\"} 1"));
    assert!(body.contains("vigil_aggregate_duration_seconds_count 1"));
}
