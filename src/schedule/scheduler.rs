//! Deferred-action queue.
//!
//! Actions are plain values, not callbacks: the owner registers an action
//! with a deadline, later asks for everything due at "now", and applies each
//! returned action to its own state. Periodic entries re-arm themselves at
//! `deadline + period`, so a late poll catches up tick by tick instead of
//! drifting.
//!
//! Every registration returns a `TimerId`. Cancelling an id removes the
//! entry immediately; stale heap slots are skipped lazily on the next pop.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Cancellation token for a scheduled action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl TimerId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// An action whose deadline has passed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<A> {
    pub id: TimerId,
    pub action: A,
    /// The deadline the action was scheduled for (not the poll time).
    pub deadline: Duration,
}

#[derive(Clone, Debug)]
struct Entry<A> {
    action: A,
    period: Option<Duration>,
    /// Sequence number of the live heap slot for this entry.
    seq: u64,
}

/// Min-heap of deadlines with cancellable entries.
///
/// Entries due at the same instant fire in registration order.
#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    queue: BinaryHeap<Reverse<(Duration, u64, TimerId)>>,
    entries: FxHashMap<TimerId, Entry<A>>,
    next_id: u64,
    next_seq: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            queue: BinaryHeap::new(),
            entries: FxHashMap::default(),
            next_id: 0,
            next_seq: 0,
        }
    }
}

impl<A: Clone> Scheduler<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` once, `delay` after `now`.
    pub fn schedule_once(&mut self, now: Duration, delay: Duration, action: A) -> TimerId {
        self.insert(now + delay, None, action)
    }

    /// Run `action` every `period`, first at `now + period`.
    ///
    /// `period` must be non-zero; a zero period would be due forever.
    pub fn schedule_every(&mut self, now: Duration, period: Duration, action: A) -> TimerId {
        debug_assert!(!period.is_zero(), "periodic timer needs a non-zero period");
        self.insert(now + period, Some(period), action)
    }

    /// Cancel a scheduled action.
    ///
    /// Returns `false` if the id already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.entries.clear();
    }

    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop the earliest action due at or before `now`.
    ///
    /// Call repeatedly until it returns `None`. Applying one action may
    /// cancel or schedule others, so the caller must not batch.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<A>> {
        self.discard_stale();
        let &Reverse((deadline, _, id)) = self.queue.peek()?;
        if deadline > now {
            return None;
        }
        self.queue.pop();

        let period = self.entries.get(&id)?.period;
        let fired = match period {
            Some(period) => {
                let seq = self.push_slot(deadline + period, id);
                let entry = self.entries.get_mut(&id)?;
                entry.seq = seq;
                Fired {
                    id,
                    action: entry.action.clone(),
                    deadline,
                }
            }
            None => {
                let entry = self.entries.remove(&id)?;
                Fired {
                    id,
                    action: entry.action,
                    deadline,
                }
            }
        };
        Some(fired)
    }

    fn insert(&mut self, deadline: Duration, period: Option<Duration>, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.push_slot(deadline, id);
        self.entries.insert(id, Entry { action, period, seq });
        id
    }

    fn push_slot(&mut self, deadline: Duration, id: TimerId) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((deadline, seq, id)));
        seq
    }

    /// Drop heap slots whose entry was cancelled or re-armed.
    fn discard_stale(&mut self) {
        while let Some(&Reverse((_, seq, id))) = self.queue.peek() {
            match self.entries.get(&id) {
                Some(entry) if entry.seq == seq => break,
                _ => {
                    self.queue.pop();
                }
            }
        }
    }
}
