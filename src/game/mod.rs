//! Game engine: session state, commands, countdown, and notifications.
//!
//! - `engine`: The `Game` state machine
//! - `event`: Notifications with text and priority for announcement layers
//! - `status`: Session states, flip outcomes, summaries, snapshots
//! - `shared`: Mutex-protected handle plus a background ticker thread

mod engine;
mod event;
mod shared;
mod status;

pub use engine::{Game, TimerAction};
pub use event::{Announcement, GameEvent, Priority};
pub use shared::{SharedGame, Ticker};
pub use status::{FlipOutcome, GameSnapshot, IgnoreReason, SessionState, StatusSummary};
