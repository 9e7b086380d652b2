//! User entity <-> model mapper

use dm_core::entities::User;
use dm_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            display_name: model.display_name,
            avatar_url: model.avatar_url,
            created_at: model.created_at,
        }
    }
}
