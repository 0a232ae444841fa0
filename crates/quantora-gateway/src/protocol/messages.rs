//! Outbound message format
//!
//! Every message the server writes to a client is one variant of
//! [`ServerMessage`], serialized with its `type` tag inline.

use chrono::{DateTime, Utc};
use quantora_core::{
    AiPerformance, DiscoveredPattern, MagicFactor, PatternDiscovery, PatternPerformance,
    PerformanceUpdate, SystemHealth, SystemStatus, WelcomeStatus,
};
use serde::Serialize;

const WELCOME_TEXT: &str = "Connected to Quantora AI Intelligence Stream";

/// Server-to-client message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once, right after admission
    ConnectionEstablished {
        message: String,
        client_id: String,
        system_status: WelcomeStatus,
        timestamp: DateTime<Utc>,
    },

    /// Reply to a client `ping`
    Pong {
        timestamp: DateTime<Utc>,
        /// Seconds between the client's stamp and the server clock
        latency: f64,
    },

    /// Reply to `request_status`
    StatusResponse {
        status: SystemStatus,
        timestamp: DateTime<Utc>,
    },

    PatternDiscovered {
        pattern: DiscoveredPattern,
        magic_factor: MagicFactor,
        timestamp: DateTime<Utc>,
    },

    AiPerformanceUpdate {
        ai_engine: String,
        performance: AiPerformance,
        timestamp: DateTime<Utc>,
    },

    SystemHealthUpdate {
        health: SystemHealth,
        timestamp: DateTime<Utc>,
    },

    /// Pushed on the per-pattern stream only
    PatternPerformanceUpdate {
        pattern_id: String,
        performance: PatternPerformance,
        timestamp: DateTime<Utc>,
    },
}

impl ServerMessage {
    // === Personal Messages ===

    #[must_use]
    pub fn connection_established(client_id: impl Into<String>) -> Self {
        Self::ConnectionEstablished {
            message: WELCOME_TEXT.to_string(),
            client_id: client_id.into(),
            system_status: WelcomeStatus::current(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn pong(latency: f64, timestamp: DateTime<Utc>) -> Self {
        Self::Pong { timestamp, latency }
    }

    #[must_use]
    pub fn status_response(status: SystemStatus) -> Self {
        Self::StatusResponse {
            status,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn pattern_performance_update(pattern_id: impl Into<String>, performance: PatternPerformance) -> Self {
        Self::PatternPerformanceUpdate {
            pattern_id: pattern_id.into(),
            performance,
            timestamp: Utc::now(),
        }
    }

    // === Broadcast Events ===

    #[must_use]
    pub fn pattern_discovered(discovery: PatternDiscovery) -> Self {
        Self::PatternDiscovered {
            pattern: discovery.pattern,
            magic_factor: discovery.magic_factor,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn ai_performance_update(update: PerformanceUpdate) -> Self {
        Self::AiPerformanceUpdate {
            ai_engine: update.ai_engine,
            performance: update.performance,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn system_health_update(health: SystemHealth) -> Self {
        Self::SystemHealthUpdate {
            health,
            timestamp: Utc::now(),
        }
    }

    // === Utilities ===

    /// The `type` tag this message serializes with
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionEstablished { .. } => "connection_established",
            Self::Pong { .. } => "pong",
            Self::StatusResponse { .. } => "status_response",
            Self::PatternDiscovered { .. } => "pattern_discovered",
            Self::AiPerformanceUpdate { .. } => "ai_performance_update",
            Self::SystemHealthUpdate { .. } => "system_health_update",
            Self::PatternPerformanceUpdate { .. } => "pattern_performance_update",
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ServerMessage(type={})", self.kind())
    }
}
