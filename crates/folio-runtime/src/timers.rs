//! Timers
//!
//! setTimeout on the page's virtual clock. Every timer carries a
//! `CancellationToken`; cancelling the token drops all of its pending timers.

use std::cell::Cell;
use std::rc::Rc;

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Shared cancellation flag for a family of timers
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every timer scheduled with this token (or a clone of it)
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug)]
struct Timer {
    id: TimerId,
    due: f64,
    token: CancellationToken,
}

/// Pending timers ordered by due time, then by scheduling order
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timeout `delay_ms` after `now`
    pub fn schedule(&mut self, now: f64, delay_ms: f64, token: &CancellationToken) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer { id, due: now + delay_ms.max(0.0), token: token.clone() });
        id
    }

    /// Clear a timer; returns false if it already fired or was cleared
    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Remove and return the earliest live timer due at or before `until`
    pub fn pop_due(&mut self, until: f64) -> Option<(TimerId, f64)> {
        self.timers.retain(|t| !t.token.is_cancelled());
        let (index, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))?;
        let timer = self.timers.remove(index);
        Some((timer.id, timer.due))
    }

    /// Due time of the earliest live timer
    pub fn next_due(&self) -> Option<f64> {
        self.timers
            .iter()
            .filter(|t| !t.token.is_cancelled())
            .map(|t| t.due)
            .min_by(f64::total_cmp)
    }

    /// Check if there are live pending timers
    pub fn has_pending(&self) -> bool {
        self.timers.iter().any(|t| !t.token.is_cancelled())
    }

    /// Number of live pending timers
    pub fn len(&self) -> usize {
        self.timers.iter().filter(|t| !t.token.is_cancelled()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
