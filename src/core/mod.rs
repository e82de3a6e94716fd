//! Core engine types: configuration, errors, RNG.
//!
//! Difficulty presets and rule variants live in `config`; nothing here
//! knows about cards or timing.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{DeckPolicy, Difficulty, EngineConfig, ExpiryRule};
pub use error::{EngineError, Result};
pub use rng::GameRng;
