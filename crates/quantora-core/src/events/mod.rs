//! Discovery events
//!
//! Payloads carried by the messages streamed to live-discovery clients.

mod payloads;

pub use payloads::{
    AiPerformance, ComponentHealth, ComponentStatus, ConfidenceTrend, DiscoveredPattern,
    HealthPerformance, LivePattern, MagicFactor, PatternDiscovery, PatternPerformance,
    PerformanceUpdate, SystemHealth, SystemStatus, WelcomeStatus,
};
