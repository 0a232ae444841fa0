//! # quantora-gateway
//!
//! WebSocket hub that streams live discovery events to every connected client.

pub mod broadcast;
pub mod connection;
pub mod handlers;
pub mod producers;
pub mod protocol;
pub mod server;
pub mod supervisor;

pub use server::{create_app, create_gateway_state, run, serve, GatewayState};
