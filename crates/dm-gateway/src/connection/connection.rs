//! Individual WebSocket connection
//!
//! One instance per socket. The connection id is process-unique and never
//! reused; the user id stays absent until the client identifies.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use dm_core::Snowflake;

use crate::protocol::WireEvent;

/// Connection state
///
/// `Connecting -> Identified -> Disconnected` or
/// `Connecting -> Anonymous -> Disconnected`. Anonymous connections receive
/// presence broadcasts but are excluded from message delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Socket accepted, not yet registered
    Connecting,
    /// Registered without an identify; receives broadcasts only
    Anonymous,
    /// Bound to a user; counts toward presence
    Identified,
    /// Being torn down
    Disconnected,
}

/// A single WebSocket connection
pub struct Connection {
    id: Uuid,
    user_id: RwLock<Option<Snowflake>>,
    state: RwLock<ConnectionState>,

    /// Outgoing frames, drained by the socket's send task
    sender: mpsc::Sender<WireEvent>,

    created_at: Instant,
}

impl Connection {
    /// Create a new connection with a fresh id
    pub fn new(sender: mpsc::Sender<WireEvent>) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            user_id: RwLock::new(None),
            state: RwLock::new(ConnectionState::Connecting),
            sender,
            created_at: Instant::now(),
        })
    }

    /// Get the connection id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the owning user id (None until identify)
    pub async fn user_id(&self) -> Option<Snowflake> {
        *self.user_id.read().await
    }

    /// Bind the connection to a user
    pub async fn set_user_id(&self, user_id: Snowflake) {
        *self.user_id.write().await = Some(user_id);
    }

    /// Get the current state
    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Set the connection state
    pub async fn set_state(&self, state: ConnectionState) {
        *self.state.write().await = state;
    }

    /// Whether the client has identified
    pub async fn is_identified(&self) -> bool {
        self.user_id.read().await.is_some()
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Queue a frame for this connection without blocking
    ///
    /// Fails when the buffer is full (a stalled client) or when the socket's
    /// send task is gone. Callers treat either as a failed delivery.
    pub fn try_send(
        &self,
        event: WireEvent,
    ) -> Result<(), mpsc::error::TrySendError<WireEvent>> {
        self.sender.try_send(event)
    }

    /// Whether the outgoing channel is gone
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .finish()
    }
}
