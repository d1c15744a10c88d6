use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{AppState, get_member_by_id, list_members, register_member};

/// Creates the API router with all member endpoints
///
/// - POST /members - Register a member
/// - GET /members - List members
/// - GET /members/:id - Get member details
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/members", post(register_member).get(list_members))
        .route("/members/:id", get(get_member_by_id))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
