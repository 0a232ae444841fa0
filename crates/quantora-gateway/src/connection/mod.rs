//! Connection management
//!
//! Tracks live WebSocket connections and their per-connection metadata.

mod connection;
mod registry;

pub use connection::{Connection, DeliveryError, OutboundSender, SessionState};
pub use registry::ConnectionRegistry;
