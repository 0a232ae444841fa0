//! Generation errors - failures while fabricating an event payload

use thiserror::Error;

/// Errors raised by the simulators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("Nothing to choose from: {0} is empty")]
    EmptyPool(&'static str),

    #[error("Invalid range for {what}: {low} > {high}")]
    InvalidRange {
        what: &'static str,
        low: f64,
        high: f64,
    },
}
