//! Broadcast hub
//!
//! Sends messages to a single connection or to every registered connection.
//! Transport failures never reach the caller: the failing connection is
//! evicted from the registry, which closes it, and the failure is logged.

use crate::connection::{Connection, ConnectionRegistry};
use crate::protocol::{BroadcastEnvelope, ServerMessage};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Outcome of a single [`BroadcastHub::broadcast`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    /// `None` when nobody was connected and nothing was sent
    pub broadcast_id: Option<Uuid>,
    /// Connections in the snapshot
    pub recipients: usize,
    /// Connections the frame was queued for
    pub delivered: usize,
    /// Connections removed because delivery failed
    pub evicted: usize,
}

impl BroadcastReport {
    const fn skipped() -> Self {
        Self {
            broadcast_id: None,
            recipients: 0,
            delivered: 0,
            evicted: 0,
        }
    }

    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        self.broadcast_id.is_none()
    }
}

/// Fan-out engine over the connection registry
pub struct BroadcastHub {
    registry: Arc<ConnectionRegistry>,
    send_timeout: Duration,
    last_broadcast: RwLock<Option<DateTime<Utc>>>,
}

impl BroadcastHub {
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>, send_timeout: Duration) -> Self {
        Self {
            registry,
            send_timeout,
            last_broadcast: RwLock::new(None),
        }
    }

    /// Get the registry this hub delivers to
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Time of the most recent broadcast that reached a non-empty snapshot
    pub fn last_broadcast(&self) -> Option<DateTime<Utc>> {
        *self.last_broadcast.read()
    }

    /// Send a personal message to one connection
    ///
    /// Returns `false` if the message was not queued. A transport failure
    /// also evicts the connection.
    pub async fn send_to(&self, connection: &Connection, message: &ServerMessage) -> bool {
        let frame = match message.to_json() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(
                    client_id = %connection.id(),
                    kind = message.kind(),
                    error = %e,
                    "Failed to serialize message"
                );
                return false;
            }
        };

        match connection.deliver(frame, self.send_timeout).await {
            Ok(()) => {
                tracing::trace!(client_id = %connection.id(), kind = message.kind(), "Message sent");
                true
            }
            Err(e) => {
                tracing::debug!(
                    client_id = %connection.id(),
                    kind = message.kind(),
                    error = %e,
                    "Send failed, evicting connection"
                );
                self.registry.remove(connection.id());
                false
            }
        }
    }

    /// Send a message to every connection registered at call time
    ///
    /// All recipients receive the same `broadcast_id`. Connections whose
    /// delivery fails are evicted after the sweep completes.
    pub async fn broadcast(&self, message: &ServerMessage) -> BroadcastReport {
        let snapshot = self.registry.snapshot();
        if snapshot.is_empty() {
            return BroadcastReport::skipped();
        }

        let envelope = BroadcastEnvelope::new(message, snapshot.len());
        let broadcast_id = envelope.broadcast_id;
        let frame = match envelope.to_json() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(kind = message.kind(), error = %e, "Failed to serialize broadcast");
                return BroadcastReport {
                    broadcast_id: Some(broadcast_id),
                    recipients: snapshot.len(),
                    delivered: 0,
                    evicted: 0,
                };
            }
        };

        let attempts = snapshot.iter().map(|connection| {
            let frame = frame.clone();
            async move { connection.deliver(frame, self.send_timeout).await }
        });
        let results = join_all(attempts).await;

        let failed: Vec<&Arc<Connection>> = snapshot
            .iter()
            .zip(&results)
            .filter_map(|(connection, result)| result.is_err().then_some(connection))
            .collect();

        let evicted = failed
            .iter()
            .filter(|connection| self.registry.remove(connection.id()))
            .count();

        *self.last_broadcast.write() = Some(Utc::now());

        let report = BroadcastReport {
            broadcast_id: Some(broadcast_id),
            recipients: snapshot.len(),
            delivered: snapshot.len() - failed.len(),
            evicted,
        };

        tracing::debug!(
            broadcast_id = %broadcast_id,
            kind = message.kind(),
            recipients = report.recipients,
            delivered = report.delivered,
            evicted = report.evicted,
            "Message broadcast to all connections"
        );

        report
    }
}

impl std::fmt::Debug for BroadcastHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastHub")
            .field("connections", &self.registry.count())
            .field("send_timeout", &self.send_timeout)
            .field("last_broadcast", &self.last_broadcast())
            .finish()
    }
}
