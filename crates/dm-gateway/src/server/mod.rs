//! WebSocket server integration

mod handler;
mod state;

pub use handler::ws_handler;
pub use state::GatewayState;
