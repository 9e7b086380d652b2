//! Presence registry
//!
//! Tracks which users currently hold at least one identified WebSocket
//! connection. A user is "online" exactly while their entry exists; the
//! entry is removed the moment the last connection goes away, so an empty
//! set is never observable. Nothing here survives a process restart.

use dashmap::DashMap;
use dm_core::Snowflake;
use std::collections::HashSet;
use uuid::Uuid;

/// Maps online users to their identified connection ids
///
/// `DashMap` serializes mutation per key, which is what keeps the
/// "key exists iff set is non-empty" invariant safe under concurrent
/// identify/disconnect traffic.
pub struct PresenceRegistry {
    online: DashMap<Snowflake, HashSet<Uuid>>,
}

impl PresenceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            online: DashMap::new(),
        }
    }

    /// Register an identified connection for a user
    pub fn add_connection(&self, user_id: Snowflake, connection_id: Uuid) {
        self.online
            .entry(user_id)
            .or_default()
            .insert(connection_id);

        tracing::debug!(user_id = %user_id, connection_id = %connection_id, "Presence registered");
    }

    /// Deregister a connection, dropping the user entry when it was the last
    pub fn remove_connection(&self, user_id: Snowflake, connection_id: Uuid) {
        let emptied = match self.online.get_mut(&user_id) {
            Some(mut entry) => {
                entry.remove(&connection_id);
                entry.is_empty()
            }
            None => false,
        };

        if emptied {
            // Entry removal happens outside the get_mut guard
            self.online
                .remove_if(&user_id, |_, connections| connections.is_empty());
            tracing::debug!(user_id = %user_id, "User went offline");
        }
    }

    /// Whether the user has at least one identified connection
    pub fn is_online(&self, user_id: Snowflake) -> bool {
        self.online.contains_key(&user_id)
    }

    /// Snapshot of every online user id
    ///
    /// The snapshot is taken fresh on each call; callers never hold a lock
    /// across it.
    pub fn online_user_ids(&self) -> Vec<Snowflake> {
        self.online.iter().map(|entry| *entry.key()).collect()
    }

    /// Snapshot of the connection ids registered for a user
    pub fn connection_ids(&self, user_id: Snowflake) -> Vec<Uuid> {
        self.online
            .get(&user_id)
            .map(|entry| entry.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of identified connections for a user
    pub fn connection_count(&self, user_id: Snowflake) -> usize {
        self.online.get(&user_id).map_or(0, |entry| entry.len())
    }

    /// Number of online users
    pub fn online_count(&self) -> usize {
        self.online.len()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("online_users", &self.online.len())
            .finish()
    }
}
