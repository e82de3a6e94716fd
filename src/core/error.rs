//! Engine error type.
//!
//! Rejected moves are not errors: flipping a face-up or matched card, or
//! flipping after the game ended, is reported as an ignored
//! [`FlipOutcome`](crate::game::FlipOutcome). Only malformed input reaches
//! this type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("card index {index} is out of range for a deck of {len} cards")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
