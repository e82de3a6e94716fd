//! Engine configuration.
//!
//! - `Difficulty`: The three fixed presets (grid size, time limit, pair count)
//! - `DeckPolicy`, `ExpiryRule`: Rule variants the engine supports
//! - `EngineConfig`: Combines the rule variants with timing parameters
//!
//! Presets are not editable. Everything else has a default and can be
//! overridden with the `with_*` builder methods or loaded from a serialized
//! config where missing fields fall back to their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Difficulty preset.
///
/// | variant | grid | time limit | pairs |
/// |---|---|---|---|
/// | Easy | 3×3 | 60s | 4 |
/// | Medium | 5×5 | 120s | 12 |
/// | Hard | 7×7 | 180s | 24 |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All presets, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Side length of the square grid.
    #[must_use]
    pub const fn grid_size(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 5,
            Difficulty::Hard => 7,
        }
    }

    /// Number of cells in the grid.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.grid_size() * self.grid_size()
    }

    /// Countdown length in seconds.
    #[must_use]
    pub const fn time_limit_secs(self) -> u32 {
        match self {
            Difficulty::Easy => 60,
            Difficulty::Medium => 120,
            Difficulty::Hard => 180,
        }
    }

    /// Pairs the player must find to win.
    #[must_use]
    pub const fn number_of_pairs(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 12,
            Difficulty::Hard => 24,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Human-readable summary for announcements.
    #[must_use]
    pub fn description(self) -> String {
        let n = self.grid_size();
        format!(
            "{} level. {} by {} grid with {} pairs to match in {} seconds",
            self.name(),
            n,
            n,
            self.number_of_pairs(),
            self.time_limit_secs()
        )
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How the deck fills the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckPolicy {
    /// Add one unmatchable filler card when the grid has exactly one cell
    /// more than the paired cards need.
    #[default]
    Padded,
    /// Paired cards only; spare cells stay empty.
    PairsOnly,
}

/// Which countdown tick ends a game that ran out of time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryRule {
    /// The tick that brings the clock to zero ends the game.
    #[default]
    OnZero,
    /// The clock shows zero for one full tick; the next tick ends the game.
    AfterZero,
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Shuffle seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,

    pub deck_policy: DeckPolicy,

    pub expiry_rule: ExpiryRule,

    /// Countdown period in milliseconds. Each period removes one second.
    pub tick_interval_ms: u64,

    /// How long a mismatched pair stays visible, in milliseconds.
    pub flip_back_delay_ms: u64,

    /// Remaining seconds at which the low-time warning fires (0 disables it).
    pub low_time_threshold_secs: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            deck_policy: DeckPolicy::default(),
            expiry_rule: ExpiryRule::default(),
            tick_interval_ms: 1000,
            flip_back_delay_ms: 1000,
            low_time_threshold_secs: 10,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_deck_policy(mut self, policy: DeckPolicy) -> Self {
        self.deck_policy = policy;
        self
    }

    #[must_use]
    pub fn with_expiry_rule(mut self, rule: ExpiryRule) -> Self {
        self.expiry_rule = rule;
        self
    }

    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    #[must_use]
    pub fn with_flip_back_delay_ms(mut self, ms: u64) -> Self {
        self.flip_back_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn with_low_time_threshold_secs(mut self, secs: u32) -> Self {
        self.low_time_threshold_secs = secs;
        self
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn flip_back_delay(&self) -> Duration {
        Duration::from_millis(self.flip_back_delay_ms)
    }

    /// Reject configurations the scheduler cannot run.
    ///
    /// A zero tick interval would make the countdown fire forever within a
    /// single update.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "tick interval must be positive".into(),
            ));
        }
        Ok(())
    }
}
