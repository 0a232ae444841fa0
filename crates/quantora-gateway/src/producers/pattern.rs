//! Pattern discovery producer

use super::delay::{seconds, window};
use super::{DelayWindow, EventProducer, ProducerError};
use crate::protocol::ServerMessage;
use quantora_common::{ConfigError, ProducerConfig};
use quantora_core::PatternDiscoverySimulator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Announces newly discovered patterns
#[derive(Debug)]
pub struct PatternDiscoveryProducer {
    simulator: PatternDiscoverySimulator,
    window: DelayWindow,
    fallback: Duration,
    rng: StdRng,
}

impl PatternDiscoveryProducer {
    #[must_use]
    pub fn new(simulator: PatternDiscoverySimulator, window: DelayWindow, fallback: Duration) -> Self {
        Self {
            simulator,
            window,
            fallback,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_config(config: &ProducerConfig) -> Result<Self, ConfigError> {
        let window = window(
            ("PRODUCER_PATTERN_MIN_SECS", config.pattern_min_secs),
            ("PRODUCER_PATTERN_MAX_SECS", config.pattern_max_secs),
        )?;
        let fallback = seconds("PRODUCER_PATTERN_FALLBACK_SECS", config.pattern_fallback_secs)?;

        Ok(Self::new(PatternDiscoverySimulator::new(), window, fallback))
    }
}

impl EventProducer for PatternDiscoveryProducer {
    fn name(&self) -> &'static str {
        "pattern_discovery"
    }

    fn next_delay(&mut self) -> Duration {
        self.window.pick(&mut self.rng)
    }

    fn fallback_delay(&self) -> Duration {
        self.fallback
    }

    fn produce(&mut self) -> Result<ServerMessage, ProducerError> {
        let discovery = self.simulator.generate()?;
        Ok(ServerMessage::pattern_discovered(discovery))
    }
}
