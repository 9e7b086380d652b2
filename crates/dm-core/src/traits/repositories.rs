//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Message, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// List every user except `excluding` (the conversation sidebar source)
    async fn find_others(&self, excluding: Snowflake) -> RepoResult<Vec<User>>;

    /// Create a new user (used by the identity collaborator and seeding)
    async fn create(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a new message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Hard delete a message; MessageNotFound if no row matched
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Flip seen to true on a single message (idempotent)
    async fn mark_seen(&self, id: Snowflake) -> RepoResult<()>;

    /// Full history between two users, ordered by created_at then id
    async fn find_conversation(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> RepoResult<Vec<Message>>;

    /// Flip seen on every unseen message from `sender` to `receiver`;
    /// returns the number of rows updated
    async fn mark_conversation_seen(
        &self,
        sender: Snowflake,
        receiver: Snowflake,
    ) -> RepoResult<u64>;

    /// Unseen message counts for `receiver`, grouped by sender.
    /// Senders with zero unseen messages are omitted.
    async fn unread_counts(&self, receiver: Snowflake) -> RepoResult<Vec<(Snowflake, i64)>>;
}
