//! User entity - a participant referenced by the messaging core
//!
//! Account lifecycle (signup, credentials, profile updates) is owned by the
//! external identity service; this layer only reads users to resolve
//! receivers and list conversation counterparts.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, display_name: String) -> Self {
        Self {
            id,
            display_name,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    /// Check if the user has an avatar set
    #[inline]
    pub fn has_avatar(&self) -> bool {
        self.avatar_url.is_some()
    }
}
