//! Conversation handlers
//!
//! Sidebar listing, conversation history, and sending messages.

use axum::extract::{Path, State};

use dm_service::dto::{ConversationListResponse, MessageResponse, SendMessageRequest};
use dm_service::{ConversationService, MessageService};

use crate::extractors::{AuthUser, CounterpartIdPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// List conversation counterparts with unread counts
///
/// GET /api/v1/conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<ConversationListResponse>> {
    let service = ConversationService::new(state.service_context());
    let response = service.list_counterparts(auth.user_id).await?;
    Ok(ApiJson(response))
}

/// Fetch the conversation history with a counterpart
///
/// GET /api/v1/conversations/:counterpart_id/messages
///
/// Marks the counterpart's unseen messages as seen as a side effect; the
/// returned records carry their pre-read flags.
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CounterpartIdPath>,
) -> ApiResult<ApiJson<Vec<MessageResponse>>> {
    let counterpart_id = path.counterpart_id()?;

    let service = ConversationService::new(state.service_context());
    let messages = service.list_messages(auth.user_id, counterpart_id).await?;
    Ok(ApiJson(messages))
}

/// Send a message to a counterpart
///
/// POST /api/v1/conversations/:counterpart_id/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CounterpartIdPath>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<ApiJson<MessageResponse>>> {
    let counterpart_id = path.counterpart_id()?;

    let service = MessageService::new(state.service_context());
    let message = service.send(auth.user_id, counterpart_id, request).await?;
    Ok(Created(ApiJson(message)))
}
