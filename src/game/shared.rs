//! Thread-safe handle and background ticker.
//!
//! `SharedGame` puts the engine behind a mutex so input handlers and the
//! ticker thread take turns: each command holds the lock for its whole
//! duration. `Ticker` polls `Game::update` on a fixed period until it is
//! stopped or dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use super::engine::Game;
use super::event::GameEvent;
use super::status::{FlipOutcome, GameSnapshot, StatusSummary};
use crate::core::{Difficulty, Result};
use crate::schedule::{Clock, SystemClock};

/// Cloneable, lock-protected engine handle.
pub struct SharedGame<C: Clock = SystemClock> {
    inner: Arc<Mutex<Game<C>>>,
}

impl<C: Clock> Clone for SharedGame<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedGame<C> {
    pub fn new(game: Game<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Lock the engine. A poisoned lock is recovered.
    pub fn lock(&self) -> MutexGuard<'_, Game<C>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut Game<C>) -> R) -> R {
        let mut game = self.lock();
        f(&mut *game)
    }

    pub fn start_game(&self, difficulty: Difficulty) {
        self.with(|game| game.start_game(difficulty));
    }

    /// Catch up on elapsed time, then flip.
    pub fn flip_card(&self, index: usize) -> Result<FlipOutcome> {
        self.with(|game| {
            game.update();
            game.flip_card(index)
        })
    }

    pub fn update(&self) {
        self.with(Game::update);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.with(|game| game.snapshot())
    }

    pub fn status_summary(&self) -> StatusSummary {
        self.with(|game| game.status_summary())
    }

    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.with(Game::drain_events)
    }
}

impl<C: Clock + Send + 'static> SharedGame<C> {
    /// Start a thread that calls `update` every `period`.
    pub fn spawn_ticker(&self, period: Duration) -> Ticker {
        let game = self.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            while !stop_flag.load(Ordering::Acquire) {
                game.update();
                thread::park_timeout(period);
            }
        });
        debug!("ticker started with period {:?}", period);

        Ticker {
            stop,
            handle: Some(handle),
        }
    }
}

/// Background update loop. Stops when dropped.
#[derive(Debug)]
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                log::warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
