//! AI performance producer

use super::delay::{seconds, window};
use super::{DelayWindow, EventProducer, ProducerError};
use crate::protocol::ServerMessage;
use quantora_common::{ConfigError, ProducerConfig};
use quantora_core::AiPerformanceSimulator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Reports per-engine performance figures
#[derive(Debug)]
pub struct AiPerformanceProducer {
    simulator: AiPerformanceSimulator,
    window: DelayWindow,
    fallback: Duration,
    rng: StdRng,
}

impl AiPerformanceProducer {
    #[must_use]
    pub fn new(simulator: AiPerformanceSimulator, window: DelayWindow, fallback: Duration) -> Self {
        Self {
            simulator,
            window,
            fallback,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_config(config: &ProducerConfig) -> Result<Self, ConfigError> {
        let window = window(
            ("PRODUCER_AI_MIN_SECS", config.ai_min_secs),
            ("PRODUCER_AI_MAX_SECS", config.ai_max_secs),
        )?;
        let fallback = seconds("PRODUCER_AI_FALLBACK_SECS", config.ai_fallback_secs)?;

        Ok(Self::new(AiPerformanceSimulator::new(), window, fallback))
    }
}

impl EventProducer for AiPerformanceProducer {
    fn name(&self) -> &'static str {
        "ai_performance"
    }

    fn next_delay(&mut self) -> Duration {
        self.window.pick(&mut self.rng)
    }

    fn fallback_delay(&self) -> Duration {
        self.fallback
    }

    fn produce(&mut self) -> Result<ServerMessage, ProducerError> {
        let update = self.simulator.generate()?;
        Ok(ServerMessage::ai_performance_update(update))
    }
}
