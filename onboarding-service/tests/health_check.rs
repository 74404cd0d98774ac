mod common;

use axum::http::StatusCode;
use common::{json_body, TestApp};
use onboarding_service::services::DocumentStore;
use service_core::observability::init_metrics;
use std::sync::Once;

#[tokio::test]
async fn root_reports_running() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Eleven Clone API is running!");
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn health_check_does_not_need_the_store() {
    let app = TestApp::disconnected();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness_follows_store_connection() {
    let app = TestApp::spawn().await;
    assert_eq!(app.get("/ready").await.status(), StatusCode::OK);

    app.store.disconnect().await;
    assert_eq!(
        app.get("/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

static METRICS_INIT: Once = Once::new();

fn ensure_metrics_initialized() {
    METRICS_INIT.call_once(|| {
        init_metrics().expect("Failed to initialize metrics");
    });
}

#[tokio::test]
async fn metrics_endpoint_exposes_request_counters() {
    ensure_metrics_initialized();
    let app = TestApp::spawn().await;
    assert_eq!(app.get("/health").await.status(), StatusCode::OK);

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("http_requests_total"), "{}", text);
    assert!(text.contains("path=\"/health\""), "{}", text);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Route not found");
}
