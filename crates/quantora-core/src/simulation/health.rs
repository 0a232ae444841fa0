//! System health simulator

use super::uniform;
use crate::{ComponentHealth, GenerationError, HealthPerformance, SystemHealth};
use rand::rngs::StdRng;
use rand::SeedableRng;

const OVERALL_SCORE: (f64, f64) = (0.92, 0.98);
const RESPONSE_TIME_MS: (f64, f64) = (45.0, 85.0);
const THROUGHPUT_RPS: (f64, f64) = (150.0, 250.0);
const MEMORY_USAGE: (f64, f64) = (0.45, 0.65);
const UPTIME: &str = "99.97%";

/// Fabricates aggregate health snapshots
#[derive(Debug)]
pub struct SystemHealthSimulator {
    rng: StdRng,
}

impl SystemHealthSimulator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self) -> Result<SystemHealth, GenerationError> {
        Ok(SystemHealth {
            overall_score: uniform(&mut self.rng, "overall score", OVERALL_SCORE)?,
            components: ComponentHealth::all_healthy(),
            performance: HealthPerformance {
                response_time_avg: uniform(&mut self.rng, "response time", RESPONSE_TIME_MS)?,
                throughput_rps: uniform(&mut self.rng, "throughput", THROUGHPUT_RPS)?,
                memory_usage: uniform(&mut self.rng, "memory usage", MEMORY_USAGE)?,
            },
            uptime: UPTIME.to_string(),
        })
    }
}

impl Default for SystemHealthSimulator {
    fn default() -> Self {
        Self::new()
    }
}
