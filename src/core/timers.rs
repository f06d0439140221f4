//! Timer queue for deferred presentation actions
//!
//! Nothing here sleeps. The session advances the queue from its tick, and
//! due actions come back to be applied in order.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Verdict;

/// Handle for cancelling a scheduled action
pub type TimerId = u64;

/// Deferred actions the session can schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Auto-dismiss the lock popup
    ClearLockNotice,
    /// Show the verdict panel
    RevealVerdict(Verdict),
    /// Hide the verdict panel after its hold
    ClearVerdict,
}

/// An action that came due, with the time it was scheduled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub due: Duration,
    pub action: TimerAction,
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TimerId,
    due: Duration,
    action: TimerAction,
}

/// Cancellable delayed actions keyed on the engine clock
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<Scheduled>,
    next_id: TimerId,
}

impl TimerQueue {
    /// Create empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` at absolute engine time `due`
    pub fn schedule_at(&mut self, due: Duration, action: TimerAction) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Scheduled { id, due, action });
        id
    }

    /// Cancel a pending action. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    /// Cancel every pending action matching `pred`, returning how many went
    pub fn cancel_where(&mut self, pred: impl Fn(&TimerAction) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|s| !pred(&s.action));
        before - self.pending.len()
    }

    /// Remove and return everything due at `now`, earliest first
    pub fn pop_due(&mut self, now: Duration) -> Vec<FiredTimer> {
        let (mut due, rest): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|s| s.due <= now);
        self.pending = rest;
        due.sort_by_key(|s| (s.due, s.id));
        due.into_iter()
            .map(|s| FiredTimer { due: s.due, action: s.action })
            .collect()
    }

    /// Is an action matching `pred` still pending?
    pub fn contains(&self, pred: impl Fn(&TimerAction) -> bool) -> bool {
        self.pending.iter().any(|s| pred(&s.action))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
