//! HTTP routes for the ingestion server

pub mod get_text;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all routes
pub fn router(max_body_size: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/get_text",
            post(get_text::get_text).layer(DefaultBodyLimit::max(max_body_size)),
        )
}

/// Landing banner
async fn root() -> &'static str {
    "Server Running Successfully"
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}
