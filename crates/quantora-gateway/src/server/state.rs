//! Gateway state
//!
//! Application state for the gateway server.

use crate::broadcast::BroadcastHub;
use crate::connection::ConnectionRegistry;
use crate::supervisor::Supervisor;
use quantora_common::AppConfig;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Live connections
    registry: Arc<ConnectionRegistry>,
    /// Fan-out over the registry
    hub: Arc<BroadcastHub>,
    /// Background producers
    supervisor: Arc<Supervisor>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Cancelled once on server shutdown
    shutdown: CancellationToken,
}

impl GatewayState {
    /// Wire up a registry, hub and supervisor sharing one shutdown token
    pub fn new(config: AppConfig) -> Self {
        let registry = ConnectionRegistry::new_shared();
        let hub = Arc::new(BroadcastHub::new(registry.clone(), config.stream.send_timeout()));
        let shutdown = CancellationToken::new();
        let supervisor = Arc::new(Supervisor::new(hub.clone(), shutdown.clone()));

        Self {
            registry,
            hub,
            supervisor,
            config: Arc::new(config),
            shutdown,
        }
    }

    /// Get the connection registry
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Get the broadcast hub
    pub fn hub(&self) -> &Arc<BroadcastHub> {
        &self.hub
    }

    /// Get the producer supervisor
    pub fn supervisor(&self) -> &Supervisor {
        &self.supervisor
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the server-wide shutdown token
    pub fn shutdown(&self) -> &CancellationToken {
        &self.shutdown
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("supervisor", &self.supervisor)
            .field("config", &"AppConfig")
            .finish()
    }
}
