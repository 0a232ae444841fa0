//! WebSocket streaming tests
//!
//! Each test runs a real server on an ephemeral port; no external services needed.
//!
//! Run with: cargo test -p integration-tests --test streaming_tests

use integration_tests::{epoch_seconds, TestServer};
use quantora_core::PatternDiscoverySimulator;
use quantora_gateway::protocol::ServerMessage;
use serde_json::json;

const LIVE: &str = "/ws/live-discovery";

// ============================================================================
// Connection Lifecycle
// ============================================================================

#[tokio::test]
async fn test_welcome_status_and_disconnect() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect(LIVE).await.unwrap();

    let welcome = client.recv_json().await.unwrap();
    assert_eq!(welcome["type"], "connection_established");
    assert_eq!(welcome["system_status"]["patterns_live"], 50);
    assert_eq!(welcome["system_status"]["ai_engines_active"], 3);
    assert!(welcome.get("broadcast_id").is_none());

    let client_id = welcome["client_id"].as_str().unwrap().to_string();
    assert!(server.state.registry().contains(&client_id));

    client.send_json(&json!({"type": "request_status"})).await.unwrap();
    let status = client.recv_json().await.unwrap();
    assert_eq!(status["type"], "status_response");
    assert_eq!(status["status"]["websocket_connections"], 1);
    assert_eq!(status["status"]["patterns_active"], 50);

    client.close().await.unwrap();
    server.wait_for_connections(0).await.unwrap();
}

#[tokio::test]
async fn test_client_ids_are_unique() {
    let server = TestServer::start().await.unwrap();
    let mut first = server.connect(LIVE).await.unwrap();
    let mut second = server.connect(LIVE).await.unwrap();

    let a = first.recv_json().await.unwrap();
    let b = second.recv_json().await.unwrap();

    assert_ne!(a["client_id"], b["client_id"]);
    server.wait_for_connections(2).await.unwrap();
}

#[tokio::test]
async fn test_server_shutdown_ends_sessions() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect(LIVE).await.unwrap();
    client.recv_json().await.unwrap();
    server.wait_for_connections(1).await.unwrap();

    server.state.shutdown().cancel();

    client.expect_close_frame().await.unwrap();
    server.wait_for_connections(0).await.unwrap();
}

#[tokio::test]
async fn test_evicted_session_closes_while_client_is_active() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect(LIVE).await.unwrap();
    let welcome = client.recv_type("connection_established").await.unwrap();
    let client_id = welcome["client_id"].as_str().unwrap().to_string();

    client.send_json(&json!({"type": "ping"})).await.unwrap();
    client.recv_type("pong").await.unwrap();

    // The hub evicts through the registry
    assert!(server.state.registry().remove(&client_id));

    client.expect_close_frame().await.unwrap();
    assert_eq!(server.state.registry().count(), 0);
}

#[tokio::test]
async fn test_evicted_pattern_stream_closes() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect("/ws/pattern-performance/whale-7").await.unwrap();
    let welcome = client.recv_type("connection_established").await.unwrap();
    let client_id = welcome["client_id"].as_str().unwrap().to_string();

    assert!(server.state.registry().remove(&client_id));

    client.expect_close_frame().await.unwrap();
}

// ============================================================================
// Broadcasts
// ============================================================================

#[tokio::test]
async fn test_broadcast_reaches_every_client() {
    let server = TestServer::start().await.unwrap();
    let mut first = server.connect(LIVE).await.unwrap();
    let mut second = server.connect(LIVE).await.unwrap();
    first.recv_type("connection_established").await.unwrap();
    second.recv_type("connection_established").await.unwrap();
    server.wait_for_connections(2).await.unwrap();

    let discovery = PatternDiscoverySimulator::with_seed(42).generate().unwrap();
    let report = server
        .state
        .hub()
        .broadcast(&ServerMessage::pattern_discovered(discovery.clone()))
        .await;
    assert_eq!(report.recipients, 2);
    assert_eq!(report.delivered, 2);

    let a = first.recv_type("pattern_discovered").await.unwrap();
    let b = second.recv_type("pattern_discovered").await.unwrap();

    assert_eq!(a["broadcast_id"], b["broadcast_id"]);
    assert_eq!(a["broadcast_id"], report.broadcast_id.unwrap().to_string());
    assert_eq!(a["connected_clients"], 2);
    assert_eq!(b["connected_clients"], 2);
    assert_eq!(a["pattern"]["name"], discovery.pattern.name.as_str());
    assert_eq!(a["magic_factor"], discovery.magic_factor.as_str());
}

#[tokio::test]
async fn test_broadcast_skips_departed_client() {
    let server = TestServer::start().await.unwrap();
    let mut stays = server.connect(LIVE).await.unwrap();
    let mut leaves = server.connect(LIVE).await.unwrap();
    stays.recv_json().await.unwrap();
    leaves.recv_json().await.unwrap();
    server.wait_for_connections(2).await.unwrap();

    leaves.close().await.unwrap();
    server.wait_for_connections(1).await.unwrap();

    let health = quantora_core::SystemHealthSimulator::with_seed(1).generate().unwrap();
    let report = server
        .state
        .hub()
        .broadcast(&ServerMessage::system_health_update(health))
        .await;
    assert_eq!(report.recipients, 1);

    let update = stays.recv_type("system_health_update").await.unwrap();
    assert_eq!(update["connected_clients"], 1);
}

// ============================================================================
// Control Messages
// ============================================================================

#[tokio::test]
async fn test_ping_returns_latency() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect(LIVE).await.unwrap();
    client.recv_json().await.unwrap();

    client
        .send_json(&json!({"type": "ping", "timestamp": epoch_seconds()}))
        .await
        .unwrap();
    let pong = client.recv_json().await.unwrap();

    assert_eq!(pong["type"], "pong");
    let latency = pong["latency"].as_f64().unwrap();
    assert!(latency >= 0.0);
    assert!(latency < 5.0);
    assert!(pong["timestamp"].is_string());
}

#[tokio::test]
async fn test_ping_without_timestamp() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect(LIVE).await.unwrap();
    client.recv_json().await.unwrap();

    client.send_json(&json!({"type": "ping"})).await.unwrap();
    let pong = client.recv_json().await.unwrap();

    assert_eq!(pong["type"], "pong");
    assert_eq!(pong["latency"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_bad_input_is_ignored() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect(LIVE).await.unwrap();
    client.recv_json().await.unwrap();

    client.send_text("definitely not json").await.unwrap();
    client.send_json(&json!({"no_type": true})).await.unwrap();
    client.send_json(&json!({"type": "subscribe", "topic": "whales"})).await.unwrap();
    client.send_binary(vec![0, 1, 2]).await.unwrap();
    client.send_json(&json!({"type": "request_status"})).await.unwrap();

    // Nothing was sent back for the ignored frames
    let reply = client.recv_json().await.unwrap();
    assert_eq!(reply["type"], "status_response");
    assert_eq!(server.state.registry().count(), 1);
}

// ============================================================================
// Pattern Performance Stream
// ============================================================================

#[tokio::test]
async fn test_pattern_stream_pushes_updates() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect("/ws/pattern-performance/whale-7").await.unwrap();

    let welcome = client.recv_json().await.unwrap();
    assert_eq!(welcome["type"], "connection_established");

    let update = client.recv_type("pattern_performance_update").await.unwrap();
    assert_eq!(update["pattern_id"], "whale-7");
    assert_eq!(update["performance"]["status"], "PERFORMING_EXCELLENTLY");
    let trades = update["performance"]["trades_today"].as_u64().unwrap();
    assert!((15..=35).contains(&trades));

    // The subject stream counts as a registered connection
    server.wait_for_connections(1).await.unwrap();

    client.close().await.unwrap();
    server.wait_for_connections(0).await.unwrap();
}

#[tokio::test]
async fn test_pattern_stream_receives_broadcasts() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect("/ws/pattern-performance/p1").await.unwrap();
    client.recv_type("connection_established").await.unwrap();
    server.wait_for_connections(1).await.unwrap();

    let health = quantora_core::SystemHealthSimulator::with_seed(2).generate().unwrap();
    server
        .state
        .hub()
        .broadcast(&ServerMessage::system_health_update(health))
        .await;

    let update = client.recv_type("system_health_update").await.unwrap();
    assert_eq!(update["connected_clients"], 1);
}
