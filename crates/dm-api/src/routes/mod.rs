//! Route definitions
//!
//! REST routes mounted under /api/v1 plus the WebSocket upgrade at /ws.
//! Health routes are exported separately so they bypass rate limiting.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use dm_gateway::ws_handler;

use crate::handlers::{conversations, health, messages};
use crate::state::AppState;

/// Create the main router: API v1 plus the WebSocket upgrade
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        // Identify happens in-band over the socket, not via auth header
        .route("/ws", get(ws_handler))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(conversations::list_conversations))
        .route(
            "/conversations/:counterpart_id/messages",
            get(conversations::get_messages),
        )
        .route(
            "/conversations/:counterpart_id/messages",
            post(conversations::send_message),
        )
        .route("/messages/:message_id", delete(messages::delete_message))
        .route("/messages/:message_id/seen", put(messages::mark_seen))
}
