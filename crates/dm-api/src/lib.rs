//! # dm-api
//!
//! REST API and WebSocket server built with Axum. Hosts the message and
//! conversation endpoints plus the realtime gateway on one listener.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
