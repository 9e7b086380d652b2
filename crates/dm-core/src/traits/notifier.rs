//! Notifier trait - the service layer's outbound realtime channel
//!
//! Implemented by the gateway. Injected so services can be tested with a
//! recording fake instead of live connections.

use async_trait::async_trait;

use crate::events::PushEvent;
use crate::value_objects::Snowflake;

/// Capability to push events to connected clients
///
/// Delivery is best-effort: an offline recipient is a silent no-op and a
/// failed push never surfaces to the caller as an error.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Push an event to every live connection of one user.
    /// Returns the number of connections the event was delivered to.
    async fn push_to_user(&self, user_id: Snowflake, event: &PushEvent) -> usize;

    /// Push an event to several users; a failure for one recipient
    /// never prevents delivery to the others.
    async fn push_to_users(&self, user_ids: &[Snowflake], event: &PushEvent);
}
