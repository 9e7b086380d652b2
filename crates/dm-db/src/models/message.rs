//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: String,
    pub image_url: Option<String>,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageModel {
    /// Check if message has an image attached
    #[inline]
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

/// Row shape for the per-sender unread aggregate
#[derive(Debug, Clone, FromRow)]
pub struct UnreadCountRow {
    pub sender_id: i64,
    pub count: i64,
}
