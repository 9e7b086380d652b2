//! Message entity - a direct message between two users

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Message entity
///
/// `sender_id` and `receiver_id` are immutable after creation. `seen` starts
/// false and only ever flips to true on receiver acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub text: String,
    pub image_url: Option<String>,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unseen Message
    pub fn new(
        id: Snowflake,
        sender_id: Snowflake,
        receiver_id: Snowflake,
        text: String,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id,
            sender_id,
            receiver_id,
            text,
            image_url,
            seen: false,
            created_at: Utc::now(),
        }
    }

    /// Check if message has an image attached
    #[inline]
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }

    /// Check if message carries no content at all (no text, no image)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.image_url.is_none()
    }

    /// Mark the message as seen by the receiver
    pub fn mark_seen(&mut self) {
        self.seen = true;
    }

    /// Get the other participant relative to `user_id`
    pub fn counterpart_of(&self, user_id: Snowflake) -> Snowflake {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}
