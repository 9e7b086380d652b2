//! Data transfer objects

mod requests;
mod responses;

pub use requests::SendMessageRequest;
pub use responses::{ConversationListResponse, MessageResponse, UserResponse};
