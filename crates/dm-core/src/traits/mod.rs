//! Domain traits (ports)

mod image_store;
mod notifier;
mod repositories;

pub use image_store::{ImageStore, is_inline_image};
pub use notifier::Notifier;
pub use repositories::{MessageRepository, RepoResult, UserRepository};
