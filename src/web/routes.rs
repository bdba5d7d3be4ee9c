//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Views
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search))
        // Session events
        .route("/session/:id/input", post(handlers::session_input))
        .route("/session/:id/select", post(handlers::session_select))
        // API routes
        .route("/autocomplete", get(handlers::autocomplete))
        .route("/candidates", post(handlers::candidates))
        .route("/health", get(handlers::health))
        // Add middleware
        .layer(cors)
        // Add state
        .with_state(state)
}
