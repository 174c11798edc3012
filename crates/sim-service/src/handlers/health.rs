use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::HealthResponse;
use crate::routes::AppState;

/// Health check endpoint.
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        service: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
