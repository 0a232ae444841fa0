//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and driving WebSocket clients.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use quantora_common::AppConfig;
use quantora_gateway::{serve, GatewayState};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// How long a test waits for any single frame or condition
pub const WAIT: Duration = Duration::from_secs(5);

/// Test server instance that manages lifecycle
///
/// Producers are not started, so the only broadcasts are the ones a test
/// sends through [`TestServer::state`].
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: GatewayState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = GatewayState::new(config);

        // Bind to an ephemeral port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let server_state = state.clone();
        let handle = tokio::spawn(async move {
            serve(listener, server_state).await.ok();
        });

        // Create HTTP client
        let client = Client::builder().timeout(WAIT).build()?;

        Ok(Self {
            addr,
            client,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Open a WebSocket on `path`
    pub async fn connect(&self, path: &str) -> Result<TestClient> {
        let url = format!("ws://{}{}", self.addr, path);
        let (socket, _) = connect_async(url.as_str())
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;
        Ok(TestClient { socket })
    }

    /// Wait until the registry holds exactly `expected` connections
    pub async fn wait_for_connections(&self, expected: usize) -> Result<()> {
        let registry = self.state.registry().clone();
        tokio::time::timeout(WAIT, async move {
            while registry.count() != expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .with_context(|| format!("Registry never reached {expected} connections"))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.state.shutdown().cancel();
    }
}

/// WebSocket client speaking the hub's JSON protocol
pub struct TestClient {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Send a raw text frame
    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.socket.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Send a JSON value as a text frame
    pub async fn send_json(&mut self, value: &Value) -> Result<()> {
        self.send_text(&value.to_string()).await
    }

    /// Send a binary frame
    pub async fn send_binary(&mut self, data: Vec<u8>) -> Result<()> {
        self.socket.send(Message::Binary(data)).await?;
        Ok(())
    }

    /// Receive the next JSON text frame, skipping control frames
    pub async fn recv_json(&mut self) -> Result<Value> {
        tokio::time::timeout(WAIT, async {
            loop {
                match self.socket.next().await {
                    Some(Ok(Message::Text(text))) => return Ok(serde_json::from_str(&text)?),
                    Some(Ok(Message::Close(_))) | None => anyhow::bail!("Connection closed"),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                }
            }
        })
        .await
        .context("Timed out waiting for a message")?
    }

    /// Receive the next message of the given `type`, skipping others
    pub async fn recv_type(&mut self, kind: &str) -> Result<Value> {
        loop {
            let message = self.recv_json().await?;
            if message["type"] == kind {
                return Ok(message);
            }
        }
    }

    /// Wait for the server to send a Close frame, skipping any other frames
    pub async fn expect_close_frame(&mut self) -> Result<()> {
        tokio::time::timeout(WAIT, async {
            loop {
                match self.socket.next().await {
                    Some(Ok(Message::Close(_))) => return Ok(()),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        return Err(anyhow::Error::from(e).context("Socket failed before Close frame"));
                    }
                    None => anyhow::bail!("Stream ended without a Close frame"),
                }
            }
        })
        .await
        .context("No Close frame received")?
    }

    /// Close the connection from the client side
    pub async fn close(mut self) -> Result<()> {
        self.socket.close(None).await?;
        Ok(())
    }
}

/// Configuration for test servers: defaults with a short poll window
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.gateway.host = "127.0.0.1".to_string();
    config.stream.poll_timeout_ms = 100;
    config.stream.send_timeout_ms = 500;
    config
}

/// Seconds since the Unix epoch, as a client clock would report them
#[allow(clippy::cast_precision_loss)]
pub fn epoch_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Assert response status and parse JSON body
pub async fn assert_json(response: Response, expected_status: StatusCode) -> Result<Value> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}
