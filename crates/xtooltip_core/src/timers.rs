//! Cancelable scheduled tasks on a host-driven clock.
//!
//! The host advances the clock from its event loop; expired tasks are
//! returned to the owner, which dispatches them. Nothing sleeps.

use std::time::Duration;

/// Identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<K> {
    id: TimerId,
    deadline: Duration,
    kind: K,
}

/// Queue of pending tasks keyed by deadline.
#[derive(Debug, Clone)]
pub struct Timers<K> {
    now: Duration,
    next_id: u64,
    pending: Vec<Entry<K>>,
}

impl<K: Copy + PartialEq + std::fmt::Debug> Timers<K> {
    pub fn new() -> Self {
        Self { now: Duration::ZERO, next_id: 0, pending: Vec::new() }
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `kind` to fire `delay` from now.
    pub fn schedule(&mut self, kind: K, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        tracing::trace!(?kind, ?delay, timer = id.0, "timer scheduled");
        self.pending.push(Entry { id, deadline, kind });
        id
    }

    /// Cancel a task. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        before != self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time until the earliest pending task, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|entry| entry.deadline.saturating_sub(self.now)).min()
    }

    /// Advance the clock and drain every task whose deadline has passed,
    /// earliest first.
    pub fn advance(&mut self, dt: Duration) -> Vec<(TimerId, K)> {
        self.now += dt;
        let now = self.now;

        let mut expired: Vec<Entry<K>> = Vec::new();
        self.pending.retain(|entry| {
            if entry.deadline <= now {
                expired.push(entry.clone());
                false
            } else {
                true
            }
        });
        expired.sort_by_key(|entry| (entry.deadline, entry.id));
        expired.into_iter().map(|entry| (entry.id, entry.kind)).collect()
    }
}

impl<K: Copy + PartialEq + std::fmt::Debug> Default for Timers<K> {
    fn default() -> Self {
        Self::new()
    }
}
