use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;
use service_core::observability::get_metrics;

use crate::models::profile::format_timestamp;
use crate::startup::AppState;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Eleven Clone API is running!" }))
}

/// Liveness only: never touches the document store.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": format_timestamp(Utc::now()),
        "uptime": state.started_at.elapsed().as_secs_f64(),
    }))
}

pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if !state.store.is_connected() {
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    match state.store.health_check().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
}
