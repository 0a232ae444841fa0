//! Broadcast envelope
//!
//! Wraps a [`ServerMessage`] with the fan-out metadata that only broadcasts carry.

use super::ServerMessage;
use serde::Serialize;
use uuid::Uuid;

/// A message as fanned out to every registered connection
#[derive(Debug, Serialize)]
pub struct BroadcastEnvelope<'a> {
    #[serde(flatten)]
    pub message: &'a ServerMessage,

    /// Shared by every copy of one broadcast
    pub broadcast_id: Uuid,

    /// Registry size when the broadcast snapshot was taken
    pub connected_clients: usize,
}

impl<'a> BroadcastEnvelope<'a> {
    #[must_use]
    pub fn new(message: &'a ServerMessage, connected_clients: usize) -> Self {
        Self {
            message,
            broadcast_id: Uuid::new_v4(),
            connected_clients,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
