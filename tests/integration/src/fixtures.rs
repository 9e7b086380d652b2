//! Test fixtures and data generators
//!
//! Request and response shapes mirroring the public API, kept separate
//! from the server DTOs so the tests exercise the wire format itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Send message request body
#[derive(Debug, Default, Serialize)]
pub struct SendMessageBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SendMessageBody {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            image: None,
        }
    }

    pub fn hosted_image(url: &str) -> Self {
        Self {
            text: None,
            image: Some(url.to_string()),
        }
    }
}

/// Message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub text: String,
    pub image_url: Option<String>,
    pub seen: bool,
    pub created_at: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

/// Conversation sidebar response
#[derive(Debug, Deserialize)]
pub struct ConversationListResponse {
    pub users: Vec<UserResponse>,
    pub unread_counts: HashMap<String, i64>,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
