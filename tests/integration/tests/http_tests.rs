//! HTTP endpoint tests
//!
//! Run with: cargo test -p integration-tests --test http_tests

use integration_tests::{assert_json, TestServer};
use quantora_gateway::protocol::ServerMessage;
use reqwest::StatusCode;

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();

    for path in ["/health", "/api/health"] {
        let response = server.get(path).await.unwrap();
        let body = assert_json(response, StatusCode::OK).await.unwrap();

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["websocket"], "healthy");
        assert_eq!(body["metrics"]["active_websocket_connections"], 0);
        assert_eq!(body["metrics"]["uptime"], "99.97%");
    }
}

#[tokio::test]
async fn test_health_counts_connections() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect("/ws/live-discovery").await.unwrap();
    client.recv_json().await.unwrap();
    server.wait_for_connections(1).await.unwrap();

    let response = server.get("/health").await.unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["metrics"]["active_websocket_connections"], 1);
}

#[tokio::test]
async fn test_live_patterns() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v2/patterns/live").await.unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();

    let patterns = body["patterns"].as_array().unwrap();
    assert_eq!(patterns.len(), 10);
    assert_eq!(body["total_count"], 10);
    assert_eq!(patterns[0]["name"], "Live Pattern 1");
    assert_eq!(patterns[9]["name"], "Live Pattern 10");

    for pattern in patterns {
        assert_eq!(pattern["status"], "live");
        let level = pattern["level"].as_u64().unwrap();
        assert!((1..=3).contains(&level));
    }
}

#[tokio::test]
async fn test_websocket_status() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v2/system/websocket-status").await.unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["active_connections"], 0);
    assert_eq!(body["total_connections_today"], 0);
    assert_eq!(body["server_status"], "running");
    assert!(body["last_broadcast"].is_null());

    let mut first = server.connect("/ws/live-discovery").await.unwrap();
    first.recv_json().await.unwrap();
    let second = server.connect("/ws/live-discovery").await.unwrap();
    server.wait_for_connections(2).await.unwrap();
    second.close().await.unwrap();
    server.wait_for_connections(1).await.unwrap();

    server
        .state
        .hub()
        .broadcast(&ServerMessage::connection_established("everyone"))
        .await;

    let response = server.get("/api/v2/system/websocket-status").await.unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["active_connections"], 1);
    assert_eq!(body["total_connections_today"], 2);
    assert!(body["last_broadcast"].is_string());
}

#[tokio::test]
async fn test_unknown_route() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/nothing").await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
