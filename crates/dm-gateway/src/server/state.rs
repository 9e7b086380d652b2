//! Gateway state
//!
//! The shared state the WebSocket handler extracts. The hosting router
//! provides it via `FromRef` from its own application state.

use std::sync::Arc;

use crate::connection::ConnectionManager;
use crate::notify::RealtimeGateway;

/// Shared state for the WebSocket handler
#[derive(Clone)]
pub struct GatewayState {
    connection_manager: Arc<ConnectionManager>,
    notifier: Arc<RealtimeGateway>,
}

impl GatewayState {
    #[must_use]
    pub fn new(connection_manager: Arc<ConnectionManager>, notifier: Arc<RealtimeGateway>) -> Self {
        Self {
            connection_manager,
            notifier,
        }
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &Arc<ConnectionManager> {
        &self.connection_manager
    }

    /// Get the realtime gateway (ephemeral relay)
    pub fn notifier(&self) -> &Arc<RealtimeGateway> {
        &self.notifier
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", &self.connection_manager)
            .finish()
    }
}
