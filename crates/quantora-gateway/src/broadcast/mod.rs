//! Event broadcasting
//!
//! Delivers messages to one connection or fans them out to all of them.

mod hub;

pub use hub::{BroadcastHub, BroadcastReport};
