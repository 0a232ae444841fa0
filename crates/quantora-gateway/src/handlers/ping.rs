//! Ping handler

use super::HandlerResult;
use crate::connection::Connection;
use crate::protocol::ServerMessage;
use chrono::{DateTime, Utc};

/// Handles `ping` latency probes
pub struct PingHandler;

impl PingHandler {
    /// Answer a ping stamped with the client's clock
    ///
    /// `latency` is `now - client_timestamp` in seconds, or 0 when the client
    /// sent no timestamp. Skewed client clocks can make it negative.
    pub fn handle(
        connection: &Connection,
        client_timestamp: Option<f64>,
        now: DateTime<Utc>,
    ) -> HandlerResult<ServerMessage> {
        connection.record_ping(now);

        let latency = client_timestamp.map_or(0.0, |sent| epoch_seconds(now) - sent);

        tracing::trace!(client_id = %connection.id(), latency, "Ping received");

        Ok(ServerMessage::pong(latency, now))
    }
}

#[allow(clippy::cast_precision_loss)]
fn epoch_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp_micros() as f64 / 1_000_000.0
}
