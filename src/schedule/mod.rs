//! Time and deferred actions.
//!
//! - `Clock`: Injectable time source (`SystemClock` for play, `ManualClock`
//!   for tests)
//! - `Scheduler`: Periodic and one-shot actions with cancellation tokens
//!
//! The scheduler holds actions as data. Whoever owns it decides when to
//! poll and applies what comes out, so no timer ever touches state behind
//! the owner's back.

pub mod clock;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{Fired, Scheduler, TimerId};
