//! Conversation service - sidebar listing and conversation history
//!
//! The read path flips seen flags: opening a conversation acknowledges every
//! unseen message from the counterpart, but the returned records carry the
//! flags as they were before the flip so the client can render "new" markers.

use std::collections::HashMap;

use tracing::{debug, instrument};

use dm_core::error::DomainError;
use dm_core::value_objects::Snowflake;

use crate::dto::{ConversationListResponse, MessageResponse, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List every other user together with per-sender unread counts
    ///
    /// Senders with nothing unread are omitted from the counts map; the
    /// client treats a missing key as zero.
    #[instrument(skip(self), fields(requester_id = %requester_id))]
    pub async fn list_counterparts(
        &self,
        requester_id: Snowflake,
    ) -> ServiceResult<ConversationListResponse> {
        let users = self.ctx.user_repo().find_others(requester_id).await?;
        let counts = self.ctx.message_repo().unread_counts(requester_id).await?;

        let unread_counts: HashMap<String, i64> = counts
            .into_iter()
            .map(|(sender_id, count)| (sender_id.to_string(), count))
            .collect();

        Ok(ConversationListResponse {
            users: users.iter().map(UserResponse::from).collect(),
            unread_counts,
        })
    }

    /// Fetch the full history between the requester and a counterpart
    ///
    /// Messages come back oldest first. Every unseen message from the
    /// counterpart is marked seen as a side effect, after the snapshot that
    /// is returned was taken.
    ///
    /// # Errors
    /// - `UserNotFound` if the counterpart does not exist
    #[instrument(skip(self), fields(requester_id = %requester_id, counterpart_id = %counterpart_id))]
    pub async fn list_messages(
        &self,
        requester_id: Snowflake,
        counterpart_id: Snowflake,
    ) -> ServiceResult<Vec<MessageResponse>> {
        self.ctx
            .user_repo()
            .find_by_id(counterpart_id)
            .await?
            .ok_or(DomainError::UserNotFound(counterpart_id))?;

        let messages = self
            .ctx
            .message_repo()
            .find_conversation(requester_id, counterpart_id)
            .await?;

        // Snapshot before the flip: the response keeps the pre-read flags
        let responses: Vec<MessageResponse> = messages.iter().map(MessageResponse::from).collect();

        let acknowledged = self
            .ctx
            .message_repo()
            .mark_conversation_seen(counterpart_id, requester_id)
            .await?;
        if acknowledged > 0 {
            debug!(acknowledged, "Conversation read acknowledged messages");
        }

        Ok(responses)
    }
}
