//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Send message request
///
/// `text` may be omitted for image-only messages; `image` carries either an
/// inline `data:` URI (uploaded at send time) or an already-hosted URL.
/// Content-level rules (neither field present, self-send) are enforced by the
/// message service.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(max = 4096, message = "Message text must be at most 4096 characters"))]
    pub text: Option<String>,

    pub image: Option<String>,
}
