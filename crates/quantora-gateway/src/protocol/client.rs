//! Inbound message format

use serde::Deserialize;

/// Client-to-server control message
///
/// Text that is not valid JSON, or lacks a `type` tag, fails to parse and is
/// dropped by the session. A well-formed message with an unrecognized tag
/// parses as [`ClientMessage::Unknown`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Latency probe carrying the client's clock in epoch seconds
    Ping {
        #[serde(default)]
        timestamp: Option<f64>,
    },

    /// Ask for an aggregate status snapshot
    RequestStatus,

    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
