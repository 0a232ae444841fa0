//! Integration test utilities for the streaming hub
//!
//! This crate provides helpers for running end-to-end tests against
//! the WebSocket streams and the HTTP status endpoints.

pub mod helpers;

pub use helpers::*;
