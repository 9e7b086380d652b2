//! Message handlers
//!
//! Unsend and seen acknowledgement for individual messages.

use axum::extract::{Path, State};

use dm_service::MessageService;

use crate::extractors::{AuthUser, MessageIdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Unsend (hard delete) a message; sender only
///
/// DELETE /api/v1/messages/:message_id
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MessageIdPath>,
) -> ApiResult<NoContent> {
    let message_id = path.message_id()?;

    let service = MessageService::new(state.service_context());
    service.unsend(auth.user_id, message_id).await?;
    Ok(NoContent)
}

/// Mark a message as seen; receiver only
///
/// PUT /api/v1/messages/:message_id/seen
pub async fn mark_seen(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MessageIdPath>,
) -> ApiResult<NoContent> {
    let message_id = path.message_id()?;

    let service = MessageService::new(state.service_context());
    service.mark_seen(auth.user_id, message_id).await?;
    Ok(NoContent)
}
