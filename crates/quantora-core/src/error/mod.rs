//! Domain errors

mod generation_error;

pub use generation_error::GenerationError;
