//! Status request handler

use super::HandlerResult;
use crate::connection::{Connection, ConnectionRegistry};
use crate::protocol::ServerMessage;
use quantora_core::sample_system_status;

/// Handles `request_status` queries
pub struct StatusHandler;

impl StatusHandler {
    /// Build a status snapshot carrying the live connection count
    pub fn handle(
        registry: &ConnectionRegistry,
        connection: &Connection,
    ) -> HandlerResult<ServerMessage> {
        let connections = registry.count();
        let status = sample_system_status(&mut rand::thread_rng(), connections)?;

        tracing::debug!(client_id = %connection.id(), connections, "Status requested");

        Ok(ServerMessage::status_response(status))
    }
}
