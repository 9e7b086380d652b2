//! Connection manager
//!
//! Owns every live connection and keeps the presence registry in sync with
//! identify and disconnect transitions. `DashMap` gives thread-safe access
//! without a global lock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use dm_core::Snowflake;

use super::{Connection, ConnectionState};
use crate::presence::PresenceRegistry;
use crate::protocol::WireEvent;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    connections: DashMap<Uuid, Arc<Connection>>,
    presence: Arc<PresenceRegistry>,
}

impl ConnectionManager {
    #[must_use]
    pub fn new(presence: Arc<PresenceRegistry>) -> Self {
        Self {
            connections: DashMap::new(),
            presence,
        }
    }

    /// Create a manager (and its registry) wrapped in Arc
    #[must_use]
    pub fn new_shared(presence: Arc<PresenceRegistry>) -> Arc<Self> {
        Arc::new(Self::new(presence))
    }

    /// Get the presence registry
    pub fn presence(&self) -> &PresenceRegistry {
        &self.presence
    }

    /// Register a new connection
    pub fn add_connection(&self, sender: mpsc::Sender<WireEvent>) -> Arc<Connection> {
        let connection = Connection::new(sender);
        self.connections.insert(connection.id(), connection.clone());

        tracing::debug!(connection_id = %connection.id(), "Connection added");

        connection
    }

    /// Bind a connection to a user and register its presence
    ///
    /// Returns false if the connection is unknown. A second identify on the
    /// same connection rebinds it: the old presence entry is dropped first.
    pub async fn identify(&self, connection_id: Uuid, user_id: Snowflake) -> bool {
        let Some(connection) = self.get_connection(connection_id) else {
            return false;
        };

        if let Some(previous) = connection.user_id().await {
            if previous != user_id {
                self.presence.remove_connection(previous, connection_id);
            }
        }

        connection.set_user_id(user_id).await;
        connection.set_state(ConnectionState::Identified).await;
        self.presence.add_connection(user_id, connection_id);

        tracing::debug!(
            connection_id = %connection_id,
            user_id = %user_id,
            "Connection identified"
        );

        true
    }

    /// Remove a connection, deregistering presence if it had identified
    ///
    /// Returns true when the connection was identified, so the caller knows
    /// whether an online-users re-broadcast is due.
    pub async fn remove_connection(&self, connection_id: Uuid) -> bool {
        let Some((_, connection)) = self.connections.remove(&connection_id) else {
            return false;
        };

        connection.set_state(ConnectionState::Disconnected).await;

        if let Some(user_id) = connection.user_id().await {
            self.presence.remove_connection(user_id, connection_id);
            tracing::debug!(
                connection_id = %connection_id,
                user_id = %user_id,
                "Identified connection removed"
            );
            true
        } else {
            tracing::debug!(connection_id = %connection_id, "Anonymous connection removed");
            false
        }
    }

    /// Get a connection by id
    pub fn get_connection(&self, connection_id: Uuid) -> Option<Arc<Connection>> {
        self.connections.get(&connection_id).map(|r| r.clone())
    }

    /// Send a frame to every identified connection of a user
    ///
    /// Returns the number of connections that accepted the frame. An offline
    /// user yields zero without error. A connection whose buffer is full has
    /// the frame dropped; the fan-out never waits on one recipient.
    pub async fn send_to_user(&self, user_id: Snowflake, event: &WireEvent) -> usize {
        let mut sent = 0;

        for connection_id in self.presence.connection_ids(user_id) {
            let Some(connection) = self.get_connection(connection_id) else {
                continue;
            };
            match connection.try_send(event.clone()) {
                Ok(()) => sent += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        user_id = %user_id,
                        event = event.name(),
                        "Frame dropped: connection buffer full"
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        user_id = %user_id,
                        "Frame dropped: connection closing"
                    );
                }
            }
        }

        tracing::trace!(user_id = %user_id, sent, event = event.name(), "Frame sent to user");

        sent
    }

    /// Send a frame to every connection, identified or not
    pub async fn broadcast(&self, event: &WireEvent) -> usize {
        let connections: Vec<Arc<Connection>> =
            self.connections.iter().map(|r| r.clone()).collect();

        let mut sent = 0;
        for connection in connections {
            match connection.try_send(event.clone()) {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection.id(),
                        error = %e,
                        "Broadcast frame dropped"
                    );
                }
            }
        }

        tracing::trace!(sent, event = event.name(), "Frame broadcast");

        sent
    }

    /// Broadcast the current online-users snapshot to every connection
    pub async fn broadcast_presence(&self) -> usize {
        let event = WireEvent::OnlineUsers {
            user_ids: self.presence.online_user_ids(),
        };
        self.broadcast(&event).await
    }

    /// Total live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("online_users", &self.presence.online_count())
            .finish()
    }
}
