//! Connection registry
//!
//! The single source of truth for who is currently connected.

use super::{Connection, OutboundSender};
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Tracks all live WebSocket connections
///
/// Every mutation takes the write lock, so admits and removals never interleave.
/// The lock is never held across an `.await`.
pub struct ConnectionRegistry {
    /// Live connections by client ID
    connections: RwLock<HashMap<String, Arc<Connection>>>,

    /// Admissions since process start
    total_admitted: AtomicU64,
}

impl ConnectionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            total_admitted: AtomicU64::new(0),
        }
    }

    /// Create an empty registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection under a freshly generated client ID
    pub fn admit(&self, sender: OutboundSender) -> Arc<Connection> {
        let mut connections = self.connections.write();

        let connection = loop {
            match connections.entry(uuid::Uuid::new_v4().to_string()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    let connection = Connection::new(slot.key().clone(), sender);
                    slot.insert(connection.clone());
                    break connection;
                }
            }
        };

        self.total_admitted.fetch_add(1, Ordering::Relaxed);
        let live = connections.len();
        drop(connections);

        tracing::info!(client_id = %connection.id(), live, "Connection admitted");

        connection
    }

    /// Remove a connection and close it
    ///
    /// Idempotent: returns `false` when the ID is not registered.
    pub fn remove(&self, id: &str) -> bool {
        let mut connections = self.connections.write();
        let removed = connections.remove(id);
        let remaining = connections.len();
        drop(connections);

        let Some(connection) = removed else {
            return false;
        };

        connection.close();
        tracing::info!(client_id = %id, remaining, "Connection removed");

        true
    }

    /// Get a connection by client ID
    pub fn get(&self, id: &str) -> Option<Arc<Connection>> {
        self.connections.read().get(id).cloned()
    }

    /// Check if a client ID is registered
    pub fn contains(&self, id: &str) -> bool {
        self.connections.read().contains_key(id)
    }

    /// Get the number of live connections
    pub fn count(&self) -> usize {
        self.connections.read().len()
    }

    /// Point-in-time copy of every live connection
    ///
    /// Later admits and removals do not affect the returned list.
    pub fn snapshot(&self) -> Vec<Arc<Connection>> {
        self.connections.read().values().cloned().collect()
    }

    /// Get the number of admissions since process start
    pub fn total_admitted(&self) -> u64 {
        self.total_admitted.load(Ordering::Relaxed)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.count())
            .field("total_admitted", &self.total_admitted())
            .finish()
    }
}
