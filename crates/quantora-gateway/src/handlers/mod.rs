//! Control message handlers
//!
//! Handles incoming client requests based on their `type`.

mod error;
mod ping;
mod status;

pub use error::{HandlerError, HandlerResult};
pub use ping::PingHandler;
pub use status::StatusHandler;

use crate::connection::{Connection, ConnectionRegistry};
use crate::protocol::{ClientMessage, ServerMessage};
use chrono::Utc;

/// Dispatch incoming client messages to appropriate handlers
pub struct ControlDispatcher;

impl ControlDispatcher {
    /// Handle an incoming client message
    ///
    /// Returns the personal reply to send back, if the message warrants one.
    pub fn dispatch(
        registry: &ConnectionRegistry,
        connection: &Connection,
        message: ClientMessage,
    ) -> HandlerResult<Option<ServerMessage>> {
        match message {
            ClientMessage::Ping { timestamp } => {
                PingHandler::handle(connection, timestamp, Utc::now()).map(Some)
            }
            ClientMessage::RequestStatus => StatusHandler::handle(registry, connection).map(Some),
            ClientMessage::Unknown => {
                tracing::debug!(client_id = %connection.id(), "Ignoring unknown message type");
                Ok(None)
            }
        }
    }
}
