//! Cancellable one-shot timers keyed by deadline.

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Handle to a scheduled timer; pass it back to [`Timeline::cancel`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimerHandle(u64);

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A set of pending one-shot timers carrying payloads of type `T`.
///
/// Timers fire in deadline order; timers sharing a deadline fire in the order
/// they were scheduled.
#[derive(Debug)]
pub struct Timeline<T> {
    next_id: u64,
    pending: BTreeMap<(Instant, u64), T>,
    deadlines: HashMap<u64, Instant>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire `delay` after `now`.
    pub fn schedule(
        &mut self,
        now: Instant,
        delay: Duration,
        payload: T,
    ) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let due = now + delay;
        self.pending.insert((due, id), payload);
        self.deadlines.insert(id, due);
        TimerHandle(id)
    }

    /// Cancel a pending timer, returning its payload if it had not fired.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let due = self.deadlines.remove(&handle.0)?;
        self.pending.remove(&(due, handle.0))
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Earliest deadline among pending timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return every timer due at or before `now`.
    pub fn drain_due(&mut self, now: Instant) -> Vec<(TimerHandle, T)> {
        let mut fired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            let (due, id) = *entry.key();
            if due > now {
                break;
            }
            let payload = entry.remove();
            self.deadlines.remove(&id);
            fired.push((TimerHandle(id), payload));
        }
        fired
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
