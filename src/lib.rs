//! # memory-match
//!
//! Game-state engine for a timed memory-matching card game.
//!
//! A player flips face-down cards on a square grid, looking for pairs that
//! share a color (and a pattern, for players who can't rely on color), and
//! races a countdown. This crate holds the rules only: rendering and
//! platform accessibility services observe the engine and call into it.
//!
//! ## Design Principles
//!
//! 1. **Single Owner**: `Game` owns all session state. Commands take
//!    `&mut self`; `SharedGame` adds a mutex when several threads need it.
//!
//! 2. **Time Is Injected**: The engine reads time through a `Clock` and keeps
//!    its countdown and flip-backs as data in a `Scheduler`, so tests drive a
//!    `ManualClock` instead of sleeping.
//!
//! 3. **Events, Not Side Effects**: The engine queues `GameEvent`s with
//!    message and priority; announcing them is the host's job.
//!
//! ## Modules
//!
//! - `core`: Difficulty presets, configuration, errors, RNG
//! - `cards`: Card values and deck construction
//! - `schedule`: Clocks and the deferred-action scheduler
//! - `game`: The engine, its events, and read-only views
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use memory_match::{Difficulty, EngineConfig, Game, ManualClock};
//!
//! let mut game = Game::with_clock(EngineConfig::new().with_seed(1), ManualClock::new())?;
//! game.start_game(Difficulty::Easy);
//!
//! // No matches made: the clock runs out after 60 seconds.
//! game.advance(Duration::from_secs(60));
//! assert!(game.game_over());
//! assert!(!game.game_won());
//! assert_eq!(
//!     game.status_summary().to_string(),
//!     "Score: 0 out of 4 pairs matched. 4 pairs remaining. Time: 0 minutes and 0 seconds"
//! );
//! # Ok::<(), memory_match::EngineError>(())
//! ```

pub mod cards;
pub mod core;
pub mod game;
pub mod schedule;

// Re-export commonly used types
pub use crate::core::{
    DeckPolicy, Difficulty, EngineConfig, EngineError, ExpiryRule, GameRng, Result,
};

pub use crate::cards::{Card, CardId, Color, DeckBuilder, Pattern};

pub use crate::schedule::{Clock, ManualClock, Scheduler, SystemClock, TimerId};

pub use crate::game::{
    Announcement, FlipOutcome, Game, GameEvent, GameSnapshot, IgnoreReason, Priority,
    SessionState, SharedGame, StatusSummary, Ticker,
};
