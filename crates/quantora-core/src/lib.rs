//! # quantora-core
//!
//! Domain layer containing the event payloads streamed to clients and the
//! simulators that fabricate them. This crate has no dependency on the
//! transport (web framework, sockets, runtime).

pub mod error;
pub mod events;
pub mod simulation;

// Re-export commonly used types at crate root
pub use error::GenerationError;
pub use events::{
    AiPerformance, ComponentHealth, ComponentStatus, ConfidenceTrend, DiscoveredPattern,
    HealthPerformance, LivePattern, MagicFactor, PatternDiscovery, PatternPerformance,
    PerformanceUpdate, SystemHealth, SystemStatus, WelcomeStatus,
};
pub use simulation::{
    sample_live_patterns, sample_pattern_performance, sample_system_status, AiPerformanceSimulator,
    EngineProfile, NameSlot, PatternDiscoverySimulator, PatternTemplate, SystemHealthSimulator,
};
