//! Producer error types

use quantora_core::GenerationError;
use thiserror::Error;

/// Why a producer tick yielded no event
#[derive(Debug, Error)]
pub enum ProducerError {
    #[error("Event generation failed: {0}")]
    Generation(#[from] GenerationError),
}
