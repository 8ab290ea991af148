// src/api/mod.rs
// HTTP surface: error type, handlers and router assembly

pub mod error;
pub mod http;

use anyhow::Result;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

use crate::state::AppState;
use self::http::{create_task_router, create_user_router, health_check, index, liveness_check};

pub const API_PREFIX: &str = "/api/auth/v1";

/// Full application router
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .nest("/user", create_user_router(state.clone()))
        .merge(create_task_router(state.clone()));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/live", get(liveness_check))
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Cookies only flow cross-origin with credentials enabled, which rules
/// out wildcard origins.
pub fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .map_err(|e| anyhow::anyhow!("Invalid CORS origin {}: {}", origin, e))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}
