//! Welcome and liveness handlers

use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Plain message body used by the welcome routes
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Liveness response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub total_requests: u64,
}

/// Root welcome message
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Welcome message", body = MessageResponse))
)]
pub async fn root_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.increment_requests();

    Json(MessageResponse {
        message: "Welcome to the tasklist API".to_string(),
    })
}

/// User-router welcome message
#[utoipa::path(
    get,
    path = "/user/",
    tag = "user",
    responses((status = 200, description = "Welcome message", body = MessageResponse))
)]
pub async fn user_root_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.increment_requests();

    Json(MessageResponse {
        message: "Welcome, user".to_string(),
    })
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_secs(),
        total_requests: state.get_request_count(),
    })
}
