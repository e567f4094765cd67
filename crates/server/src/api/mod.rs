//! HTTP surface exposed to the surrounding application.

pub mod error;
pub mod evaluation;
pub mod problems;
pub mod state;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use codeforge_api_types::HealthCheckResponse;
use tower_http::cors::CorsLayer;

pub use error::ApiError;
pub use state::AppState;

/// Header carrying the caller's identity, injected by the surrounding
/// application's auth layer. Authentication itself is not implemented here.
pub const USER_HEADER: &str = "x-user-external-id";

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(evaluation::create_evaluation_router())
        .merge(problems::create_problem_router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}

pub(crate) fn external_user_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
