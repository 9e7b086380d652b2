//! Message entity <-> model mapper

use dm_core::entities::Message;
use dm_core::value_objects::Snowflake;

use crate::models::{MessageModel, UnreadCountRow};

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            sender_id: Snowflake::new(model.sender_id),
            receiver_id: Snowflake::new(model.receiver_id),
            text: model.text,
            image_url: model.image_url,
            seen: model.seen,
            created_at: model.created_at,
        }
    }
}

/// Convert an unread aggregate row to (sender, count)
impl From<UnreadCountRow> for (Snowflake, i64) {
    fn from(row: UnreadCountRow) -> Self {
        (Snowflake::new(row.sender_id), row.count)
    }
}
