//! System health producer

use super::delay::seconds;
use super::{DelayWindow, EventProducer, ProducerError};
use crate::protocol::ServerMessage;
use quantora_common::{ConfigError, ProducerConfig};
use quantora_core::SystemHealthSimulator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Publishes periodic health snapshots on a fixed interval
#[derive(Debug)]
pub struct SystemHealthProducer {
    simulator: SystemHealthSimulator,
    interval: DelayWindow,
    fallback: Duration,
    rng: StdRng,
}

impl SystemHealthProducer {
    #[must_use]
    pub fn new(simulator: SystemHealthSimulator, interval: Duration, fallback: Duration) -> Self {
        Self {
            simulator,
            interval: DelayWindow::fixed(interval),
            fallback,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_config(config: &ProducerConfig) -> Result<Self, ConfigError> {
        let interval = seconds("PRODUCER_HEALTH_INTERVAL_SECS", config.health_interval_secs)?;
        let fallback = seconds("PRODUCER_HEALTH_FALLBACK_SECS", config.health_fallback_secs)?;

        Ok(Self::new(SystemHealthSimulator::new(), interval, fallback))
    }
}

impl EventProducer for SystemHealthProducer {
    fn name(&self) -> &'static str {
        "system_health"
    }

    fn next_delay(&mut self) -> Duration {
        self.interval.pick(&mut self.rng)
    }

    fn fallback_delay(&self) -> Duration {
        self.fallback
    }

    fn produce(&mut self) -> Result<ServerMessage, ProducerError> {
        let health = self.simulator.generate()?;
        Ok(ServerMessage::system_health_update(health))
    }
}
