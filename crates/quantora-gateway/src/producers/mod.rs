//! Background event producers
//!
//! Each producer synthesizes one kind of domain event on its own schedule.
//! [`run_producer`] drives a producer and pushes its events through the hub.

mod delay;
mod error;
mod health;
mod pattern;
mod performance;
mod runner;

pub use delay::DelayWindow;
pub use error::ProducerError;
pub use health::SystemHealthProducer;
pub use pattern::PatternDiscoveryProducer;
pub use performance::AiPerformanceProducer;
pub use runner::run_producer;

use crate::protocol::ServerMessage;
use std::time::Duration;

/// A periodic source of broadcast events
pub trait EventProducer: Send + 'static {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Wait before the next tick
    fn next_delay(&mut self) -> Duration;

    /// Wait after a failed tick
    fn fallback_delay(&self) -> Duration;

    /// Synthesize the next event
    fn produce(&mut self) -> Result<ServerMessage, ProducerError>;
}
