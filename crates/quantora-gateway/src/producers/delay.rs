//! Producer wait intervals

use quantora_common::ConfigError;
use rand::Rng;
use std::time::Duration;

/// Inclusive range a producer draws its next wait from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayWindow {
    min: Duration,
    max: Duration,
}

impl DelayWindow {
    /// A window that always yields `delay`
    #[must_use]
    pub const fn fixed(delay: Duration) -> Self {
        Self {
            min: delay,
            max: delay,
        }
    }

    /// Build a window from configured bounds; `min` must not exceed `max`
    pub fn between(min: Duration, max: Duration) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

/// Convert a configured number of seconds into a [`Duration`]
pub(super) fn seconds(key: &'static str, secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidValue(key, secs.to_string()))
}

/// Build a window from configured second bounds
pub(super) fn window(
    (min_key, min_secs): (&'static str, f64),
    (max_key, max_secs): (&'static str, f64),
) -> Result<DelayWindow, ConfigError> {
    let min = seconds(min_key, min_secs)?;
    let max = seconds(max_key, max_secs)?;
    DelayWindow::between(min, max).ok_or_else(|| {
        ConfigError::InvalidValue(min_key, format!("{min_secs} exceeds maximum {max_secs}"))
    })
}
