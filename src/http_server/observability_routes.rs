//! Observability HTTP Routes
//!
//! Health check and store counters.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::observability::MetricsSnapshot;

use super::user_routes::UsersState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Metrics response
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub store_path: String,
    pub metrics: MetricsSnapshot,
}

/// Create observability routes
pub fn observability_routes(state: Arc<UsersState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health check route (also available at root /health)
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn metrics_handler(State(state): State<Arc<UsersState>>) -> impl IntoResponse {
    let response = MetricsResponse {
        store_path: state.store.path().display().to_string(),
        metrics: state.store.metrics().snapshot(),
    };

    (StatusCode::OK, Json(response))
}
