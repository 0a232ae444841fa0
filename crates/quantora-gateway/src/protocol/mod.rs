//! Stream protocol definitions
//!
//! Typed inbound and outbound messages, plus the broadcast envelope.

mod client;
mod envelope;
mod messages;

pub use client::ClientMessage;
pub use envelope::BroadcastEnvelope;
pub use messages::ServerMessage;
