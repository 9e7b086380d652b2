//! Push events - what the service layer asks the realtime channel to deliver
//!
//! The service layer emits these through the [`Notifier`](crate::traits::Notifier)
//! trait; the gateway turns them into wire frames. Delivery is best-effort
//! and never affects the persisted state that produced the event.

use crate::entities::Message;
use crate::value_objects::Snowflake;

/// An event pushed to connected clients after a state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    /// A message was created; carries the full persisted record
    NewMessage(Message),

    /// A message was unsent by its sender
    MessageDeleted { message_id: Snowflake },
}

impl PushEvent {
    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewMessage(_) => "new-message",
            Self::MessageDeleted { .. } => "message-deleted",
        }
    }
}
