//! Application state
//!
//! Shared state for the Axum application: the service context, the gateway
//! state for the WebSocket handler, and configuration.

use std::sync::Arc;

use axum::extract::FromRef;

use dm_common::{AppConfig, JwtService};
use dm_gateway::GatewayState;
use dm_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    gateway_state: GatewayState,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        gateway_state: GatewayState,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            gateway_state,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

/// Lets the WebSocket handler extract its own state slice
impl FromRef<AppState> for GatewayState {
    fn from_ref(state: &AppState) -> Self {
        state.gateway_state.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("gateway_state", &self.gateway_state)
            .field("config", &"AppConfig")
            .finish()
    }
}
