//! ImageStore trait - opaque image hosting collaborator
//!
//! The core never stores image bytes; it exchanges an inline data URI for a
//! hosted URL at send time and asks for a best-effort delete at unsend time.

use async_trait::async_trait;

use crate::error::DomainError;

/// Capability to host message images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload an inline `data:` URI payload; returns the hosted URL
    async fn upload(&self, data_uri: &str) -> Result<String, DomainError>;

    /// Delete a previously uploaded image by its hosted URL
    async fn delete(&self, url: &str) -> Result<(), DomainError>;
}

/// Check whether an image field carries inline bytes that need uploading,
/// as opposed to an already-hosted URL that is stored as-is.
pub fn is_inline_image(value: &str) -> bool {
    value.starts_with("data:image/")
}
