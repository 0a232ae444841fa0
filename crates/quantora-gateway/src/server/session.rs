//! Connection sessions
//!
//! A session owns one upgraded socket from admission to close. Outbound
//! frames flow through the connection's queue to a dedicated writer task.

use crate::connection::{Connection, SessionState};
use crate::handlers::ControlDispatcher;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::server::GatewayState;
use axum::extract::ws::{Message, WebSocket};
use chrono::Utc;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use quantora_core::{sample_pattern_performance, GenerationError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};

/// What the loop should do after an inbound frame
enum Flow {
    Continue,
    Close,
}

/// An admitted connection with its socket halves wired up
struct Session {
    connection: Arc<Connection>,
    stream: SplitStream<WebSocket>,
    writer: JoinHandle<()>,
}

impl Session {
    /// Admit the socket and queue the welcome message
    ///
    /// Returns `None` if the welcome could not be queued; the connection is
    /// already deregistered in that case.
    async fn open(state: &GatewayState, socket: WebSocket) -> Option<Self> {
        let (sink, stream) = socket.split();
        let (tx, rx) = mpsc::channel(state.config().stream.outbound_buffer.max(1));

        let connection = state.registry().admit(tx);
        let writer = tokio::spawn(write_frames(sink, rx, connection.id().to_string()));

        let session = Self {
            connection,
            stream,
            writer,
        };

        let welcome = ServerMessage::connection_established(session.connection.id());
        if !state.hub().send_to(&session.connection, &welcome).await {
            tracing::warn!(client_id = %session.connection.id(), "Failed to send welcome message");
            session.close(state).await;
            return None;
        }

        session.connection.set_state(SessionState::Active);
        Some(session)
    }

    fn id(&self) -> &str {
        self.connection.id()
    }

    /// Deregister and let the writer flush its queue
    ///
    /// Dropping the last sender ends the writer, which then sends a Close
    /// frame. A writer still blocked after the send timeout is aborted.
    async fn close(self, state: &GatewayState) {
        let Self {
            connection,
            stream,
            mut writer,
        } = self;

        connection.close();
        state.registry().remove(connection.id());

        tracing::info!(
            client_id = %connection.id(),
            connected_secs = (Utc::now() - connection.connected_at()).num_seconds(),
            last_ping = %connection.last_ping(),
            "Session closed"
        );

        let client_id = connection.id().to_string();
        drop(connection);
        drop(stream);

        if writer.is_finished() {
            return;
        }
        if timeout(state.config().stream.send_timeout(), &mut writer).await.is_err() {
            tracing::debug!(client_id = %client_id, "Writer did not finish, aborting");
            writer.abort();
        }
    }
}

/// Drain the outbound queue into the socket
async fn write_frames(
    mut sink: SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<String>,
    client_id: String,
) {
    while let Some(frame) = rx.recv().await {
        if let Err(e) = sink.send(Message::Text(frame)).await {
            tracing::debug!(client_id = %client_id, error = %e, "Failed to write to WebSocket");
            break;
        }
    }

    // Close the WebSocket when the queue is closed
    let _ = sink.close().await;
}

/// Live discovery protocol loop
///
/// Answers `ping` and `request_status` while producers push broadcasts
/// through the hub.
pub(super) async fn run_live_session(state: GatewayState, socket: WebSocket) {
    let Some(mut session) = Session::open(&state, socket).await else {
        return;
    };

    let poll = state.config().stream.poll_timeout();

    loop {
        tokio::select! {
            biased;

            () = state.shutdown().cancelled() => {
                tracing::debug!(client_id = %session.id(), "Server shutting down");
                break;
            }
            () = session.connection.closed() => {
                tracing::debug!(client_id = %session.id(), "Connection evicted");
                break;
            }
            _ = &mut session.writer => {
                tracing::debug!(client_id = %session.id(), "Writer task ended");
                break;
            }
            inbound = timeout(poll, session.stream.next()) => match inbound {
                // Nothing arrived within the poll window
                Err(_) => {}
                Ok(None) => break,
                Ok(Some(Err(e))) => {
                    tracing::debug!(client_id = %session.id(), error = %e, "WebSocket error");
                    break;
                }
                Ok(Some(Ok(message))) => {
                    if let Flow::Close = handle_frame(&state, &session.connection, message).await {
                        break;
                    }
                }
            }
        }
    }

    session.close(&state).await;
}

/// Handle one inbound frame on the live stream
async fn handle_frame(state: &GatewayState, connection: &Arc<Connection>, message: Message) -> Flow {
    match message {
        Message::Text(text) => {
            let request = match ClientMessage::from_json(&text) {
                Ok(request) => request,
                Err(e) => {
                    tracing::debug!(client_id = %connection.id(), error = %e, "Discarding malformed message");
                    return Flow::Continue;
                }
            };

            match ControlDispatcher::dispatch(state.registry(), connection, request) {
                Ok(Some(reply)) => deliver(state, connection, &reply).await,
                Ok(None) => Flow::Continue,
                Err(e) => {
                    tracing::warn!(client_id = %connection.id(), error = %e, "Handler error");
                    Flow::Continue
                }
            }
        }
        Message::Binary(_) => {
            tracing::debug!(client_id = %connection.id(), "Ignoring binary message");
            Flow::Continue
        }
        Message::Ping(_) | Message::Pong(_) => {
            // Protocol pings are answered by axum
            Flow::Continue
        }
        Message::Close(_) => {
            tracing::info!(client_id = %connection.id(), "Client closed connection");
            Flow::Close
        }
    }
}

/// Send a personal message, closing the session if the connection was evicted
async fn deliver(state: &GatewayState, connection: &Connection, message: &ServerMessage) -> Flow {
    if state.hub().send_to(connection, message).await || state.registry().contains(connection.id()) {
        Flow::Continue
    } else {
        Flow::Close
    }
}

/// Per-pattern performance stream
///
/// Registered like any other connection, so broadcasts reach it too.
/// Inbound frames are read only to notice the client leaving.
pub(super) async fn run_pattern_session(state: GatewayState, socket: WebSocket, pattern_id: String) {
    let Some(mut session) = Session::open(&state, socket).await else {
        return;
    };

    tracing::debug!(client_id = %session.id(), pattern_id = %pattern_id, "Pattern stream opened");

    let mut ticker = interval(state.config().stream.subject_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            () = state.shutdown().cancelled() => break,
            () = session.connection.closed() => break,
            _ = &mut session.writer => break,
            inbound = session.stream.next() => match inbound {
                None | Some(Err(_) | Ok(Message::Close(_))) => break,
                Some(Ok(_)) => {}
            },
            _ = ticker.tick() => {
                let update = match performance_update(&pattern_id) {
                    Ok(update) => update,
                    Err(e) => {
                        tracing::warn!(pattern_id = %pattern_id, error = %e, "Failed to sample pattern performance");
                        continue;
                    }
                };

                if let Flow::Close = deliver(&state, &session.connection, &update).await {
                    break;
                }
            }
        }
    }

    session.close(&state).await;
}

fn performance_update(pattern_id: &str) -> Result<ServerMessage, GenerationError> {
    let performance = sample_pattern_performance(&mut rand::thread_rng())?;
    Ok(ServerMessage::pattern_performance_update(pattern_id, performance))
}
