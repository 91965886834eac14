use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "medicine-service",
        "version": env!("CARGO_PKG_VERSION"),
        "medicines": state.catalog.len()
    }))
}

/// Not ready without a catalog to match against.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.catalog.is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
