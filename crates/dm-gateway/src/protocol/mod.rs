//! Wire protocol
//!
//! JSON frames exchanged over the WebSocket.

mod events;

pub use events::{MessagePayload, WireEvent, WireProtocolError};
