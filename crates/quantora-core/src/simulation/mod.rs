//! Event simulators
//!
//! Fabricate plausible payloads for the background producers and the
//! snapshot queries. Every simulator owns its RNG so producers share nothing.

mod health;
mod pattern;
mod performance;
mod snapshot;

pub use health::SystemHealthSimulator;
pub use pattern::{NameSlot, PatternDiscoverySimulator, PatternTemplate};
pub use performance::{AiPerformanceSimulator, EngineProfile};
pub use snapshot::{sample_live_patterns, sample_pattern_performance, sample_system_status};

use crate::GenerationError;
use rand::Rng;

/// Draw uniformly from `[low, high]`, rejecting inverted ranges instead of panicking
pub(crate) fn uniform<R: Rng + ?Sized>(
    rng: &mut R,
    what: &'static str,
    (low, high): (f64, f64),
) -> Result<f64, GenerationError> {
    if low > high || !low.is_finite() || !high.is_finite() {
        return Err(GenerationError::InvalidRange { what, low, high });
    }
    Ok(rng.gen_range(low..=high))
}
