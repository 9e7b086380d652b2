//! Message service - send, unsend, and seen acknowledgement
//!
//! Owns the write path: content validation, inline image upload, persistence,
//! and the realtime push to both participants. Delivery is best effort; a
//! persisted message is never rolled back because a push found no connection.

use tracing::{info, instrument, warn};

use dm_core::entities::Message;
use dm_core::error::DomainError;
use dm_core::events::PushEvent;
use dm_core::traits::is_inline_image;
use dm_core::value_objects::Snowflake;

use crate::dto::{MessageResponse, SendMessageRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Maximum message text length in characters
pub const MAX_TEXT_LEN: usize = 4096;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a message from `sender_id` to `receiver_id`
    ///
    /// Validates content, uploads an inline image if present, persists the
    /// message, then pushes `new-message` to both participants.
    ///
    /// # Errors
    /// - `EmptyMessage` if there is neither text nor image
    /// - `SelfMessage` if sender and receiver are the same user
    /// - `ContentTooLong` if the text exceeds `MAX_TEXT_LEN` characters
    /// - `UserNotFound` if the receiver does not exist
    /// - `ImageStoreError` if an inline image fails to upload (nothing is persisted)
    #[instrument(skip(self, request), fields(sender_id = %sender_id, receiver_id = %receiver_id))]
    pub async fn send(
        &self,
        sender_id: Snowflake,
        receiver_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let text = request.text.unwrap_or_default();
        let image = request.image.filter(|i| !i.trim().is_empty());

        if text.trim().is_empty() && image.is_none() {
            return Err(DomainError::EmptyMessage.into());
        }
        if sender_id == receiver_id {
            return Err(DomainError::SelfMessage.into());
        }
        if text.chars().count() > MAX_TEXT_LEN {
            return Err(DomainError::ContentTooLong { max: MAX_TEXT_LEN }.into());
        }

        // Receiver must exist before any upload happens
        self.ctx
            .user_repo()
            .find_by_id(receiver_id)
            .await?
            .ok_or(DomainError::UserNotFound(receiver_id))?;

        // Inline data URIs are uploaded first; an upload failure aborts the
        // send with nothing persisted. Hosted URLs pass through untouched.
        let image_url = match image {
            Some(ref i) if is_inline_image(i) => Some(self.ctx.image_store().upload(i).await?),
            other => other,
        };

        let message = Message::new(
            self.ctx.generate_id(),
            sender_id,
            receiver_id,
            text,
            image_url,
        );
        self.ctx.message_repo().create(&message).await?;

        info!(message_id = %message.id, has_image = message.has_image(), "Message sent");

        let event = PushEvent::NewMessage(message.clone());
        self.ctx
            .notifier()
            .push_to_users(&[sender_id, receiver_id], &event)
            .await;

        Ok(MessageResponse::from(&message))
    }

    /// Unsend (hard delete) a message
    ///
    /// Only the original sender may unsend. The stored image, if any, is
    /// deleted best effort; the row is removed either way and both
    /// participants receive `message-deleted`.
    ///
    /// # Errors
    /// - `MessageNotFound` if the message does not exist (or was already unsent)
    /// - `NotMessageSender` if the requester is not the sender
    #[instrument(skip(self), fields(requester_id = %requester_id, message_id = %message_id))]
    pub async fn unsend(
        &self,
        requester_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<()> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        if message.sender_id != requester_id {
            return Err(DomainError::NotMessageSender.into());
        }

        if let Some(ref image_url) = message.image_url {
            if let Err(e) = self.ctx.image_store().delete(image_url).await {
                warn!(message_id = %message_id, error = %e, "Failed to delete message image");
            }
        }

        self.ctx.message_repo().delete(message_id).await?;

        info!(message_id = %message_id, "Message unsent");

        let event = PushEvent::MessageDeleted { message_id };
        self.ctx
            .notifier()
            .push_to_users(&[message.sender_id, message.receiver_id], &event)
            .await;

        Ok(())
    }

    /// Mark a single message as seen
    ///
    /// Only the receiver may acknowledge. Repeated calls are harmless.
    ///
    /// # Errors
    /// - `MessageNotFound` if the message does not exist
    /// - `NotMessageReceiver` if the requester is not the receiver
    #[instrument(skip(self), fields(requester_id = %requester_id, message_id = %message_id))]
    pub async fn mark_seen(
        &self,
        requester_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<()> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        if message.receiver_id != requester_id {
            return Err(DomainError::NotMessageReceiver.into());
        }

        self.ctx.message_repo().mark_seen(message_id).await?;
        Ok(())
    }
}
