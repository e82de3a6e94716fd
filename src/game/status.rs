//! Session state, command outcomes, and read-only views.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::Difficulty;

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No game started yet.
    #[default]
    Ready,
    Active,
    /// All pairs found.
    Won,
    /// The countdown ran out.
    TimedOut,
}

impl SessionState {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::TimedOut)
    }
}

/// Why a flip had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    AlreadyFaceUp,
    AlreadyMatched,
    /// The game is over or was never started.
    NotActive,
    /// A mismatched pair is still showing.
    AwaitingFlipBack,
}

/// Result of a `flip_card` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair is showing.
    Selected,
    /// Second card paired with the first.
    Matched { score: usize },
    /// Second card did not pair; both flip back after the delay.
    Mismatched,
    /// The match completed the board.
    Won,
}

impl FlipOutcome {
    #[must_use]
    pub const fn is_ignored(self) -> bool {
        matches!(self, Self::Ignored(_))
    }
}

/// Score and clock in a form suitable for a status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub score: usize,
    pub total_pairs: usize,
    pub remaining_pairs: usize,
    pub minutes: u32,
    pub seconds: u32,
}

impl StatusSummary {
    #[must_use]
    pub fn new(score: usize, total_pairs: usize, time_remaining: u32) -> Self {
        Self {
            score,
            total_pairs,
            remaining_pairs: total_pairs.saturating_sub(score),
            minutes: time_remaining / 60,
            seconds: time_remaining % 60,
        }
    }
}

impl std::fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Score: {} out of {} pairs matched. {} pairs remaining. Time: {} minutes and {} seconds",
            self.score, self.total_pairs, self.remaining_pairs, self.minutes, self.seconds
        )
    }
}

/// Point-in-time copy of everything a renderer needs.
///
/// Cards are held in a persistent vector, so taking a snapshot does not
/// copy the deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Increments on every `start_game`.
    pub session: u32,
    pub difficulty: Option<Difficulty>,
    pub state: SessionState,
    pub cards: Vector<Card>,
    pub score: usize,
    pub time_remaining: u32,
    pub game_over: bool,
    pub game_won: bool,
    pub first_selected: Option<usize>,
    pub pending_mismatch: Option<(usize, usize)>,
}

impl GameSnapshot {
    #[must_use]
    pub fn status_summary(&self) -> StatusSummary {
        let total = self.difficulty.map_or(0, Difficulty::number_of_pairs);
        StatusSummary::new(self.score, total, self.time_remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state() {
        assert!(!SessionState::Ready.is_active());
        assert!(!SessionState::Ready.is_terminal());
        assert!(SessionState::Active.is_active());
        assert!(SessionState::Won.is_terminal());
        assert!(SessionState::TimedOut.is_terminal());
    }

    #[test]
    fn test_status_summary_text() {
        let summary = StatusSummary::new(3, 12, 95);
        assert_eq!(summary.remaining_pairs, 9);
        assert_eq!(summary.minutes, 1);
        assert_eq!(summary.seconds, 35);
        assert_eq!(
            summary.to_string(),
            "Score: 3 out of 12 pairs matched. 9 pairs remaining. Time: 1 minutes and 35 seconds"
        );
    }

    #[test]
    fn test_status_summary_zero_time() {
        let summary = StatusSummary::new(0, 4, 0);
        assert_eq!(summary.minutes, 0);
        assert_eq!(summary.seconds, 0);
        assert_eq!(summary.remaining_pairs, 4);
    }

    #[test]
    fn test_outcome_is_ignored() {
        assert!(FlipOutcome::Ignored(IgnoreReason::NotActive).is_ignored());
        assert!(!FlipOutcome::Selected.is_ignored());
        assert!(!FlipOutcome::Matched { score: 1 }.is_ignored());
    }
}
