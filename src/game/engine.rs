//! The game engine.
//!
//! `Game` owns the whole session: deck, score, countdown, selection, and the
//! scheduler holding deferred actions. Commands take `&mut self`, so every
//! mutation happens on one sequential timeline. Time only moves when the
//! host calls [`Game::update`], which fires every deferred action whose
//! deadline has passed according to the injected [`Clock`].
//!
//! ## Rules
//!
//! - Flipping a face-down card shows it. The first card waits for a second.
//! - Two cards of the same color stay up and score.
//! - Two cards that don't stay visible for `flip_back_delay`, then turn
//!   face-down. Further flips are ignored until they do.
//! - Finding every pair wins immediately and stops the countdown.
//! - The countdown removes a second per tick; running out loses.
//! - After the game ends, no command changes cards, score, or time.

use im::Vector;
use log::{debug, info, trace};
use smallvec::SmallVec;

use super::event::GameEvent;
use super::status::{FlipOutcome, GameSnapshot, IgnoreReason, SessionState, StatusSummary};
use crate::cards::{Card, DeckBuilder};
use crate::core::{Difficulty, EngineConfig, EngineError, ExpiryRule, GameRng, Result};
use crate::schedule::{Clock, ManualClock, Scheduler, SystemClock, TimerId};

/// Deferred work the engine schedules for itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    CountdownTick,
    FlipBack { first: usize, second: usize },
}

/// A memory-match session and its countdown.
///
/// ```
/// use std::time::Duration;
/// use memory_match::{Difficulty, EngineConfig, FlipOutcome, Game, ManualClock};
///
/// let clock = ManualClock::new();
/// let mut game = Game::with_clock(EngineConfig::new().with_seed(7), clock)?;
/// game.start_game(Difficulty::Easy);
///
/// assert_eq!(game.cards().len(), 9);
/// assert_eq!(game.flip_card(0)?, FlipOutcome::Selected);
///
/// game.advance(Duration::from_secs(5));
/// assert_eq!(game.time_remaining(), 55);
/// # Ok::<(), memory_match::EngineError>(())
/// ```
#[derive(Debug)]
pub struct Game<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
    rng: GameRng,
    deck_builder: DeckBuilder,
    scheduler: Scheduler<TimerAction>,
    countdown: Option<TimerId>,

    session: u32,
    difficulty: Option<Difficulty>,
    state: SessionState,
    cards: Vector<Card>,
    score: usize,
    time_remaining: u32,
    first_selected: Option<usize>,
    pending_mismatch: Option<(usize, usize)>,
    low_time_warned: bool,

    events: Vec<GameEvent>,
}

impl Game<SystemClock> {
    /// Create an engine driven by wall-clock time.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> Game<C> {
    /// Create an engine driven by `clock`. No game is running until
    /// `start_game` is called.
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        debug!("engine created with seed {}", rng.seed());

        Ok(Self {
            deck_builder: DeckBuilder::new(config.deck_policy),
            config,
            clock,
            rng,
            scheduler: Scheduler::new(),
            countdown: None,
            session: 0,
            difficulty: None,
            state: SessionState::Ready,
            cards: Vector::new(),
            score: 0,
            time_remaining: 0,
            first_selected: None,
            pending_mismatch: None,
            low_time_warned: false,
            events: Vec::new(),
        })
    }

    // === Commands ===

    /// Start a fresh session, discarding the previous one.
    ///
    /// Every deferred action of the previous session is cancelled first, so
    /// neither its countdown nor a pending flip-back can touch the new deck.
    pub fn start_game(&mut self, difficulty: Difficulty) {
        if !self.scheduler.is_empty() {
            debug!("cancelling {} pending timers", self.scheduler.len());
        }
        self.scheduler.clear();
        self.countdown = None;

        self.session = self.session.wrapping_add(1);
        self.difficulty = Some(difficulty);
        self.state = SessionState::Active;
        self.score = 0;
        self.time_remaining = difficulty.time_limit_secs();
        self.first_selected = None;
        self.pending_mismatch = None;
        self.low_time_warned = false;
        self.cards = self
            .deck_builder
            .build(difficulty, &mut self.rng)
            .into_iter()
            .collect();

        let now = self.clock.now();
        self.countdown = Some(self.scheduler.schedule_every(
            now,
            self.config.tick_interval(),
            TimerAction::CountdownTick,
        ));

        info!(
            "session {} started: {} ({} cards, {}s)",
            self.session,
            difficulty,
            self.cards.len(),
            self.time_remaining
        );
        self.emit(GameEvent::GameStarted { difficulty });
    }

    /// Flip the card at `index`.
    ///
    /// Flips that cannot apply (card already showing or matched, game not
    /// running, mismatched pair still showing) return
    /// `FlipOutcome::Ignored` and change nothing. Only an index past the
    /// end of the deck is an error.
    pub fn flip_card(&mut self, index: usize) -> Result<FlipOutcome> {
        let len = self.cards.len();
        let card = self
            .cards
            .get(index)
            .ok_or(EngineError::IndexOutOfRange { index, len })?;

        let ignored = if card.matched {
            Some(IgnoreReason::AlreadyMatched)
        } else if card.face_up {
            Some(IgnoreReason::AlreadyFaceUp)
        } else if !self.state.is_active() {
            Some(IgnoreReason::NotActive)
        } else if self.pending_mismatch.is_some() {
            Some(IgnoreReason::AwaitingFlipBack)
        } else {
            None
        };
        if let Some(reason) = ignored {
            trace!("flip {} ignored: {:?}", index, reason);
            return Ok(FlipOutcome::Ignored(reason));
        }

        self.cards[index].face_up = true;
        let pattern = self.cards[index].pattern;
        debug!("revealed card {} ({})", index, self.cards[index].pattern_name());
        self.emit(GameEvent::CardRevealed { index, pattern });

        match self.first_selected {
            None => {
                self.first_selected = Some(index);
                Ok(FlipOutcome::Selected)
            }
            Some(first) => Ok(self.resolve(first, index)),
        }
    }

    /// Fire every deferred action due at the clock's current time.
    ///
    /// Actions fire in deadline order; a late call catches up one tick at a
    /// time, so the countdown never skips the low-time warning or expiry.
    pub fn update(&mut self) {
        let now = self.clock.now();
        while let Some(fired) = self.scheduler.pop_due(now) {
            trace!("{} fired at {:?}: {:?}", fired.id, fired.deadline, fired.action);
            match fired.action {
                TimerAction::CountdownTick => self.countdown_tick(),
                TimerAction::FlipBack { first, second } => self.flip_back_pair(first, second),
            }
        }
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Queries ===

    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn game_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn game_won(&self) -> bool {
        self.state == SessionState::Won
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn first_selected(&self) -> Option<usize> {
        self.first_selected
    }

    /// The mismatched pair waiting to flip back, if any.
    pub fn pending_mismatch(&self) -> Option<(usize, usize)> {
        self.pending_mismatch
    }

    /// Number of `start_game` calls so far.
    pub fn session(&self) -> u32 {
        self.session
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed of the shuffle RNG, for replaying a run.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Pairs needed to win the current session (0 before the first start).
    pub fn total_pairs(&self) -> usize {
        self.difficulty.map_or(0, Difficulty::number_of_pairs)
    }

    /// Whether the countdown is still scheduled.
    pub fn countdown_running(&self) -> bool {
        self.countdown
            .is_some_and(|id| self.scheduler.is_scheduled(id))
    }

    /// Indices of cards showing but not matched.
    ///
    /// At most one outside a mismatch, exactly two during one.
    pub fn face_up_unmatched(&self) -> SmallVec<[usize; 2]> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.face_up && !card.matched)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn status_summary(&self) -> StatusSummary {
        StatusSummary::new(self.score, self.total_pairs(), self.time_remaining)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            session: self.session,
            difficulty: self.difficulty,
            state: self.state,
            cards: self.cards.clone(),
            score: self.score,
            time_remaining: self.time_remaining,
            game_over: self.game_over(),
            game_won: self.game_won(),
            first_selected: self.first_selected,
            pending_mismatch: self.pending_mismatch,
        }
    }

    // === Internals ===

    fn resolve(&mut self, first: usize, second: usize) -> FlipOutcome {
        self.first_selected = None;

        if self.cards[first].matches(&self.cards[second]) {
            self.cards[first].matched = true;
            self.cards[second].matched = true;
            self.score += 1;
            let pattern = self.cards[first].pattern;
            debug_assert_eq!(pattern, self.cards[second].pattern);
            debug!("cards {} and {} matched, score {}", first, second, self.score);
            self.emit(GameEvent::MatchFound {
                first,
                second,
                pattern,
                score: self.score,
            });

            if self.score == self.total_pairs() {
                self.finish(SessionState::Won);
                return FlipOutcome::Won;
            }
            FlipOutcome::Matched { score: self.score }
        } else {
            self.pending_mismatch = Some((first, second));
            let now = self.clock.now();
            self.scheduler.schedule_once(
                now,
                self.config.flip_back_delay(),
                TimerAction::FlipBack { first, second },
            );
            debug!("cards {} and {} mismatched", first, second);
            self.emit(GameEvent::Mismatch { first, second });
            FlipOutcome::Mismatched
        }
    }

    fn flip_back_pair(&mut self, first: usize, second: usize) {
        self.pending_mismatch = None;

        if self.state.is_terminal() {
            debug!("flip-back of {} and {} skipped: game over", first, second);
            return;
        }
        let (Some(a), Some(b)) = (self.cards.get(first), self.cards.get(second)) else {
            return;
        };
        if a.matched || b.matched {
            return;
        }

        self.cards[first].face_up = false;
        self.cards[second].face_up = false;
        self.first_selected = None;
        debug!("cards {} and {} flipped back", first, second);
        self.emit(GameEvent::FlippedBack { first, second });
    }

    fn countdown_tick(&mut self) {
        if !self.state.is_active() {
            return;
        }

        if self.time_remaining == 0 {
            self.finish(SessionState::TimedOut);
            return;
        }

        self.time_remaining -= 1;
        trace!("tick: {}s remaining", self.time_remaining);

        let threshold = self.config.low_time_threshold_secs;
        if threshold > 0 && self.time_remaining == threshold && !self.low_time_warned {
            self.low_time_warned = true;
            self.emit(GameEvent::LowTimeWarning {
                seconds_remaining: threshold,
            });
        }

        if self.time_remaining == 0 && self.config.expiry_rule == ExpiryRule::OnZero {
            self.finish(SessionState::TimedOut);
        }
    }

    /// Move to a terminal state and stop the countdown. Runs at most once
    /// per session.
    fn finish(&mut self, outcome: SessionState) {
        debug_assert!(outcome.is_terminal());
        if self.state.is_terminal() {
            return;
        }
        self.state = outcome;

        if let Some(id) = self.countdown.take() {
            let cancelled = self.scheduler.cancel(id);
            debug_assert!(cancelled, "countdown was already stopped");
        }

        match outcome {
            SessionState::Won => {
                info!(
                    "session {} won with {}s remaining",
                    self.session, self.time_remaining
                );
                self.emit(GameEvent::Won {
                    score: self.score,
                    time_remaining: self.time_remaining,
                });
            }
            _ => {
                info!(
                    "session {} timed out with {}/{} pairs",
                    self.session,
                    self.score,
                    self.total_pairs()
                );
                self.emit(GameEvent::TimedOut {
                    score: self.score,
                    total_pairs: self.total_pairs(),
                });
            }
        }
    }

    fn emit(&mut self, event: GameEvent) {
        trace!("event: {}", event);
        self.events.push(event);
    }
}

impl Game<ManualClock> {
    /// Move the simulated clock forward and fire whatever became due.
    pub fn advance(&mut self, by: std::time::Duration) {
        self.clock.advance(by);
        self.update();
    }
}
