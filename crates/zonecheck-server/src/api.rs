pub mod checks;
pub mod pagination;

use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Prefix of every versioned API route.
pub const API_V1: &str = "/api/v1";

/// API error body
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// Human-readable error message
    pub detail: String,
}

pub fn error_response(status: StatusCode, detail: &str) -> Response {
    (
        status,
        Json(ApiError {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}

/// Service health
#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Always "healthy" while the process serves requests
    status: String,
}

/// Get service health.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Landing payload for `/`
#[derive(Serialize, ToSchema)]
struct WelcomeResponse {
    message: String,
    docs: String,
    health: String,
}

/// Welcome message pointing at the docs and health endpoints.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse)
    )
)]
async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(WelcomeResponse {
        message: format!("Welcome to {} API", state.config.project_name),
        docs: "/docs".to_string(),
        health: format!("{API_V1}/health"),
    })
}

pub fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(root))
        .routes(routes!(health))
}

pub fn check_routes() -> OpenApiRouter<AppState> {
    checks::check_routes()
}
