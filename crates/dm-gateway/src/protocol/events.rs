//! Wire event definitions
//!
//! Every frame is a tagged envelope `{"event": ..., "data": ...}` with a
//! fixed schema per event name. Unknown event names and malformed payloads
//! fail to parse; the handler closes the connection on parse failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dm_core::entities::Message;
use dm_core::events::PushEvent;
use dm_core::Snowflake;

/// Error decoding or encoding a wire frame
#[derive(Debug, Error)]
pub enum WireProtocolError {
    #[error("Invalid frame: {0}")]
    InvalidFrame(#[from] serde_json::Error),
}

/// Message record as it appears on the wire
///
/// Mirrors the persisted record; ids serialize as strings via `Snowflake`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for MessagePayload {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            text: message.text.clone(),
            image_url: message.image_url.clone(),
            seen: message.seen,
            created_at: message.created_at,
        }
    }
}

/// A frame on the WebSocket, in either direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum WireEvent {
    /// client -> server: bind this connection to a user
    Identify { user_id: Snowflake },

    /// server -> all connections: full snapshot of online users
    OnlineUsers { user_ids: Vec<Snowflake> },

    /// server -> both participants: a message was created
    NewMessage(MessagePayload),

    /// server -> both participants: a message was unsent
    MessageDeleted { message_id: Snowflake },

    /// client -> server, relayed to the receiver while online
    Typing {
        sender_id: Snowflake,
        receiver_id: Snowflake,
    },

    /// client -> server, relayed to the receiver while online
    StopTyping {
        sender_id: Snowflake,
        receiver_id: Snowflake,
    },
}

impl WireEvent {
    /// Event name as it appears in the `event` field
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identify { .. } => "identify",
            Self::OnlineUsers { .. } => "online-users",
            Self::NewMessage(_) => "new-message",
            Self::MessageDeleted { .. } => "message-deleted",
            Self::Typing { .. } => "typing",
            Self::StopTyping { .. } => "stop-typing",
        }
    }

    /// Whether clients are allowed to send this event
    #[must_use]
    pub fn is_client_event(&self) -> bool {
        matches!(
            self,
            Self::Identify { .. } | Self::Typing { .. } | Self::StopTyping { .. }
        )
    }

    /// Parse a frame from its JSON text
    pub fn from_json(text: &str) -> Result<Self, WireProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize a frame to JSON text
    pub fn to_json(&self) -> Result<String, WireProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<&PushEvent> for WireEvent {
    fn from(event: &PushEvent) -> Self {
        match event {
            PushEvent::NewMessage(message) => Self::NewMessage(MessagePayload::from(message)),
            PushEvent::MessageDeleted { message_id } => Self::MessageDeleted {
                message_id: *message_id,
            },
        }
    }
}
