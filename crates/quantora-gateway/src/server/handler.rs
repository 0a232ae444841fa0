//! WebSocket handlers
//!
//! Upgrade endpoints for the live discovery stream and the per-pattern stream.

use super::session::{run_live_session, run_pattern_session};
use crate::server::GatewayState;
use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
};

/// Live discovery stream
///
/// GET /ws/live-discovery
pub async fn live_discovery_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| tracing::warn!(error = %e, "WebSocket upgrade failed"))
        .on_upgrade(move |socket| run_live_session(state, socket))
}

/// Per-pattern performance stream
///
/// GET /ws/pattern-performance/{pattern_id}
pub async fn pattern_performance_handler(
    State(state): State<GatewayState>,
    Path(pattern_id): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| tracing::warn!(error = %e, "WebSocket upgrade failed"))
        .on_upgrade(move |socket| run_pattern_session(state, socket, pattern_id))
}
