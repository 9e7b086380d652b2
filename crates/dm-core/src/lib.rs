//! # dm-core
//!
//! Domain layer containing entities, value objects, repository traits, and push events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Message, User};
pub use error::DomainError;
pub use events::PushEvent;
pub use traits::{
    ImageStore, MessageRepository, Notifier, RepoResult, UserRepository, is_inline_image,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
