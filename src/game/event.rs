//! Game notifications.
//!
//! The engine does not speak to players itself. It queues a `GameEvent` at
//! each point a screen reader or UI would want to react, and the host drains
//! the queue. Every event renders to a plain-text message with a priority
//! hint so an announcement layer can forward it without knowing the rules.

use serde::{Deserialize, Serialize};

use crate::cards::{pattern_label, Pattern};
use crate::core::Difficulty;

/// How urgently an announcement should interrupt the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        difficulty: Difficulty,
    },
    CardRevealed {
        index: usize,
        pattern: Option<Pattern>,
    },
    MatchFound {
        first: usize,
        second: usize,
        pattern: Option<Pattern>,
        score: usize,
    },
    Mismatch {
        first: usize,
        second: usize,
    },
    /// A mismatched pair turned face-down again.
    FlippedBack {
        first: usize,
        second: usize,
    },
    LowTimeWarning {
        seconds_remaining: u32,
    },
    Won {
        score: usize,
        time_remaining: u32,
    },
    TimedOut {
        score: usize,
        total_pairs: usize,
    },
}

/// Text plus priority, ready for an announcement service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub message: String,
    pub priority: Priority,
}

impl GameEvent {
    #[must_use]
    pub fn priority(&self) -> Priority {
        match self {
            GameEvent::FlippedBack { .. } => Priority::Low,
            GameEvent::GameStarted { .. }
            | GameEvent::CardRevealed { .. }
            | GameEvent::MatchFound { .. }
            | GameEvent::Mismatch { .. } => Priority::Medium,
            GameEvent::LowTimeWarning { .. } | GameEvent::Won { .. } | GameEvent::TimedOut { .. } => {
                Priority::High
            }
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            GameEvent::GameStarted { difficulty } => {
                format!("Game started. {}", difficulty.description())
            }
            GameEvent::CardRevealed { pattern, .. } => {
                format!("Revealed {} card", pattern_label(*pattern))
            }
            GameEvent::MatchFound { pattern, score, .. } => format!(
                "Match found! {} cards matched. Score is now {}",
                pattern_label(*pattern),
                score
            ),
            GameEvent::Mismatch { .. } => "No match. Cards will flip back".to_string(),
            GameEvent::FlippedBack { .. } => "Cards flipped back".to_string(),
            GameEvent::LowTimeWarning { seconds_remaining } => {
                format!("Warning: Only {} seconds remaining", seconds_remaining)
            }
            GameEvent::Won {
                score,
                time_remaining,
            } => format!(
                "Congratulations! You won! All {} pairs matched with {} seconds remaining",
                score, time_remaining
            ),
            GameEvent::TimedOut { score, total_pairs } => format!(
                "Time's up! Game over. Your final score is {} out of {} pairs",
                score, total_pairs
            ),
        }
    }

    #[must_use]
    pub fn announcement(&self) -> Announcement {
        Announcement {
            message: self.message(),
            priority: self.priority(),
        }
    }

    /// Whether this event ends the session.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::Won { .. } | GameEvent::TimedOut { .. })
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
