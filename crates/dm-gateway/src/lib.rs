//! # dm-gateway
//!
//! WebSocket gateway: presence registry, connection bookkeeping, the tagged
//! wire-event protocol, and the realtime push channel the message service
//! delivers through.

pub mod connection;
pub mod notify;
pub mod presence;
pub mod protocol;
pub mod server;

pub use connection::{Connection, ConnectionManager, ConnectionState};
pub use notify::RealtimeGateway;
pub use presence::PresenceRegistry;
pub use protocol::{MessagePayload, WireEvent};
pub use server::{ws_handler, GatewayState};
