//! Individual WebSocket connection
//!
//! Represents a single live client and the handle used to reach its socket.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Outbound frames queued for a connection's writer task
pub type OutboundSender = mpsc::Sender<String>;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Registered, welcome message not yet queued
    Admitted,
    /// Welcome sent, serving requests and broadcasts
    Active,
    /// Terminal
    Closed,
}

/// Why a frame could not be handed to a connection
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The writer task has exited, so the socket is gone
    #[error("Connection closed")]
    Closed,

    /// The outbound queue stayed full for the whole send timeout
    #[error("Send timed out after {0:?}")]
    Timeout(Duration),
}

/// A single WebSocket connection
pub struct Connection {
    /// Unique client ID, sent to the client in the welcome message
    id: String,

    /// Admission time
    connected_at: DateTime<Utc>,

    /// Last liveness signal (admission or latest ping)
    last_ping: RwLock<DateTime<Utc>>,

    /// Current lifecycle state
    state: RwLock<SessionState>,

    /// Channel to the socket writer task
    sender: OutboundSender,

    /// Cancelled once the connection has left the registry
    closed: CancellationToken,
}

impl Connection {
    /// Create a new connection
    pub fn new(id: String, sender: OutboundSender) -> Arc<Self> {
        let now = Utc::now();
        Arc::new(Self {
            id,
            connected_at: now,
            last_ping: RwLock::new(now),
            state: RwLock::new(SessionState::Admitted),
            sender,
            closed: CancellationToken::new(),
        })
    }

    /// Get the client ID
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    pub fn last_ping(&self) -> DateTime<Utc> {
        *self.last_ping.read()
    }

    /// Record a liveness signal
    pub fn record_ping(&self, at: DateTime<Utc>) {
        *self.last_ping.write() = at;
    }

    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// Move to a new state. `Closed` is terminal and is never left.
    pub fn set_state(&self, state: SessionState) {
        let mut current = self.state.write();
        if *current != SessionState::Closed {
            *current = state;
        }
    }

    /// Mark the connection closed and wake its session
    pub fn close(&self) {
        self.set_state(SessionState::Closed);
        self.closed.cancel();
    }

    /// Resolves once [`Connection::close`] has been called
    pub fn closed(&self) -> WaitForCancellationFuture<'_> {
        self.closed.cancelled()
    }

    /// Queue a serialized frame for the writer task
    ///
    /// Frames queued on one connection are written in call order.
    pub async fn deliver(&self, frame: String, timeout: Duration) -> Result<(), DeliveryError> {
        self.sender
            .send_timeout(frame, timeout)
            .await
            .map_err(|e| match e {
                SendTimeoutError::Closed(_) => DeliveryError::Closed,
                SendTimeoutError::Timeout(_) => DeliveryError::Timeout(timeout),
            })
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("connected_at", &self.connected_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_creation() {
        let (tx, _rx) = mpsc::channel(10);
        let conn = Connection::new("client-1".to_string(), tx);

        assert_eq!(conn.id(), "client-1");
        assert_eq!(conn.state(), SessionState::Admitted);
        assert_eq!(conn.last_ping(), conn.connected_at());
    }

    #[tokio::test]
    async fn test_record_ping() {
        let (tx, _rx) = mpsc::channel(10);
        let conn = Connection::new("client-1".to_string(), tx);

        let later = conn.connected_at() + chrono::Duration::seconds(30);
        conn.record_ping(later);
        assert_eq!(conn.last_ping(), later);
    }

    #[tokio::test]
    async fn test_closed_is_terminal() {
        let (tx, _rx) = mpsc::channel(10);
        let conn = Connection::new("client-1".to_string(), tx);

        conn.set_state(SessionState::Active);
        assert_eq!(conn.state(), SessionState::Active);

        conn.set_state(SessionState::Closed);
        conn.set_state(SessionState::Active);
        assert_eq!(conn.state(), SessionState::Closed);
    }

    #[tokio::test]
    async fn test_close_wakes_waiters() {
        let (tx, _rx) = mpsc::channel(10);
        let conn = Connection::new("client-1".to_string(), tx);
        conn.set_state(SessionState::Active);

        let waiter = {
            let conn = conn.clone();
            tokio::spawn(async move { conn.closed().await })
        };

        conn.close();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(conn.state(), SessionState::Closed);
    }

    #[tokio::test]
    async fn test_deliver_preserves_order() {
        let (tx, mut rx) = mpsc::channel(10);
        let conn = Connection::new("client-1".to_string(), tx);

        for frame in ["a", "b", "c"] {
            conn.deliver(frame.to_string(), Duration::from_millis(50)).await.unwrap();
        }

        assert_eq!(rx.recv().await.as_deref(), Some("a"));
        assert_eq!(rx.recv().await.as_deref(), Some("b"));
        assert_eq!(rx.recv().await.as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn test_deliver_to_dropped_writer_fails() {
        let (tx, rx) = mpsc::channel(10);
        let conn = Connection::new("client-1".to_string(), tx);
        drop(rx);

        let err = conn.deliver("x".to_string(), Duration::from_millis(50)).await.unwrap_err();
        assert!(matches!(err, DeliveryError::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deliver_to_full_queue_times_out() {
        let (tx, _rx) = mpsc::channel(1);
        let conn = Connection::new("client-1".to_string(), tx);

        conn.deliver("first".to_string(), Duration::from_millis(50)).await.unwrap();
        let err = conn.deliver("second".to_string(), Duration::from_millis(50)).await.unwrap_err();
        assert!(matches!(err, DeliveryError::Timeout(_)));
    }
}
