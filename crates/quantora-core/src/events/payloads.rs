//! Event payload definitions
//!
//! Defines the data structures for each streamed event type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// === Pattern Discovery ===

/// Qualitative tier attached to a discovery, derived from its success rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MagicFactor {
    Revolutionary,
    Exceptional,
    Impressive,
    Solid,
}

impl MagicFactor {
    /// Tier for a predicted success rate. Thresholds are strict lower bounds.
    #[must_use]
    pub fn from_success_rate(success_rate: f64) -> Self {
        if success_rate > 0.90 {
            Self::Revolutionary
        } else if success_rate > 0.85 {
            Self::Exceptional
        } else if success_rate > 0.80 {
            Self::Impressive
        } else {
            Self::Solid
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revolutionary => "REVOLUTIONARY",
            Self::Exceptional => "EXCEPTIONAL",
            Self::Impressive => "IMPRESSIVE",
            Self::Solid => "SOLID",
        }
    }
}

/// A newly discovered trading pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredPattern {
    pub id: Uuid,
    pub name: String,
    pub level: u8,
    pub predicted_success_rate: f64,
    pub confidence_score: f64,
    pub creator_ai: String,
    pub atomic_parameters: Vec<String>,
    pub discovery_method: String,
}

/// Output of the pattern discovery simulator
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDiscovery {
    pub pattern: DiscoveredPattern,
    pub magic_factor: MagicFactor,
}

// === AI Performance ===

/// Performance figures of one AI engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiPerformance {
    /// Patterns per hour
    pub discovery_rate: f64,
    pub success_rate_trend: f64,
    pub patterns_created_today: u32,
    pub innovation_score: f64,
    pub resource_utilization: f64,
}

/// Output of the AI performance simulator
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceUpdate {
    pub ai_engine: String,
    pub performance: AiPerformance,
}

// === System Health ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
}

/// Status of each subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub database: ComponentStatus,
    pub ai_engines: ComponentStatus,
    pub api_gateway: ComponentStatus,
    pub pattern_discovery: ComponentStatus,
}

impl ComponentHealth {
    #[must_use]
    pub fn all_healthy() -> Self {
        Self {
            database: ComponentStatus::Healthy,
            ai_engines: ComponentStatus::Healthy,
            api_gateway: ComponentStatus::Healthy,
            pattern_discovery: ComponentStatus::Healthy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthPerformance {
    /// Milliseconds
    pub response_time_avg: f64,
    pub throughput_rps: f64,
    /// Fraction of available memory in use
    pub memory_usage: f64,
}

/// Aggregate health snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub overall_score: f64,
    pub components: ComponentHealth,
    pub performance: HealthPerformance,
    pub uptime: String,
}

// === Status ===

/// Static status advertised in the welcome message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelcomeStatus {
    pub patterns_live: u32,
    pub ai_engines_active: u32,
    pub success_rate_peak: f64,
    pub magic_level: String,
}

impl WelcomeStatus {
    #[must_use]
    pub fn current() -> Self {
        Self {
            patterns_live: 50,
            ai_engines_active: 3,
            success_rate_peak: 88.5,
            magic_level: "MAXIMUM".to_string(),
        }
    }
}

/// Answer to a `request_status` query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub patterns_active: u32,
    pub ai_engines_running: u32,
    pub success_rate_peak: f64,
    pub discoveries_today: u32,
    pub system_health: f64,
    pub magic_level: String,
    pub websocket_connections: usize,
}

// === Pattern Performance ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceTrend {
    Increasing,
    Stable,
    Decreasing,
}

/// Live figures for one pattern, pushed on the per-pattern stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternPerformance {
    pub success_rate_current: f64,
    pub trades_today: u32,
    pub profit_today: f64,
    pub confidence_trend: ConfidenceTrend,
    pub status: String,
}

// === Snapshots ===

/// One entry of the live patterns listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivePattern {
    pub pattern_id: Uuid,
    pub name: String,
    pub success_rate: f64,
    pub sharpe_ratio: f64,
    pub level: u8,
    pub max_drawdown: f64,
    pub status: String,
    pub creator_ai: String,
    pub created_at: DateTime<Utc>,
}
