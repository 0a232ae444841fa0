//! Handler error types

use quantora_core::GenerationError;
use thiserror::Error;

/// Handler error type
///
/// None of these end the session; the request is dropped and logged.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A reply payload could not be sampled
    #[error("Failed to build reply: {0}")]
    Generation(#[from] GenerationError),
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
