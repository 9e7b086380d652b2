//! Database models

mod message;
mod user;

pub use message::{MessageModel, UnreadCountRow};
pub use user::UserModel;
