//! Realtime gateway
//!
//! The concrete [`Notifier`] the service layer pushes through. Constructed
//! at startup before the service context, so services can never run without
//! a realtime channel. Delivery is best effort: an offline recipient is a
//! silent no-op and a failed recipient never blocks the others.

use std::sync::Arc;

use async_trait::async_trait;

use dm_core::events::PushEvent;
use dm_core::traits::Notifier;
use dm_core::Snowflake;

use crate::connection::ConnectionManager;
use crate::protocol::WireEvent;

/// Pushes service-layer events to connected clients
pub struct RealtimeGateway {
    manager: Arc<ConnectionManager>,
}

impl RealtimeGateway {
    #[must_use]
    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        Self { manager }
    }

    /// Get the connection manager
    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }

    /// Relay a typing signal to its receiver while they are online
    ///
    /// Never persisted; a disconnect between relay and render loses the
    /// signal by design of the protocol, not by error.
    pub async fn relay_ephemeral(&self, receiver_id: Snowflake, event: &WireEvent) -> usize {
        if !self.manager.presence().is_online(receiver_id) {
            return 0;
        }
        self.manager.send_to_user(receiver_id, event).await
    }
}

#[async_trait]
impl Notifier for RealtimeGateway {
    async fn push_to_user(&self, user_id: Snowflake, event: &PushEvent) -> usize {
        let frame = WireEvent::from(event);
        let delivered = self.manager.send_to_user(user_id, &frame).await;

        tracing::debug!(
            user_id = %user_id,
            event = event.name(),
            delivered,
            "Push event delivered"
        );

        delivered
    }

    async fn push_to_users(&self, user_ids: &[Snowflake], event: &PushEvent) {
        for &user_id in user_ids {
            // One recipient's connections failing never skips the rest
            let delivered = self.push_to_user(user_id, event).await;
            if delivered == 0 {
                tracing::trace!(
                    user_id = %user_id,
                    event = event.name(),
                    "No live connections for push event"
                );
            }
        }
    }
}

impl std::fmt::Debug for RealtimeGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeGateway")
            .field("manager", &self.manager)
            .finish()
    }
}
