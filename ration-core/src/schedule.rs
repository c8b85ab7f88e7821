//! Keyed, cancellable one-shot tasks over a logical clock.
//!
//! Scheduling a task under a key that already has one pending replaces it, so at
//! most one task per key is ever pending. A task fires at most once: it is
//! removed from the queue when [`Scheduler::advance`] returns it or when it is
//! cancelled. Nothing here depends on wall-clock time; callers move the clock.

use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
struct Pending<T> {
    due: Duration,
    seq: u64,
    payload: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<K: Ord + Clone, T> {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<K, Pending<T>>,
}

impl<K: Ord + Clone, T> Default for Scheduler<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, T> Scheduler<K, T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire after `delay`, superseding any task under `key`.
    ///
    /// Returns `true` if a pending task was replaced.
    pub fn schedule(&mut self, key: K, delay: Duration, payload: T) -> bool {
        let seq = self.next_seq;
        self.next_seq += 1;
        let task = Pending {
            due: self.now + delay,
            seq,
            payload,
        };
        self.pending.insert(key, task).is_some()
    }

    /// Drop the pending task under `key`. Returns `false` if there was none.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.pending.remove(key).is_some()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time left until the task under `key` fires.
    pub fn remaining(&self, key: &K) -> Option<Duration> {
        self.pending
            .get(key)
            .map(|task| task.due.saturating_sub(self.now))
    }

    /// Move the clock forward and return every task that became due, in order of
    /// due time (ties in scheduling order).
    pub fn advance(&mut self, by: Duration) -> Vec<(K, T)> {
        self.now += by;
        let now = self.now;

        let due_keys: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, task)| task.due <= now)
            .map(|(key, _)| key.clone())
            .collect();

        let mut fired: Vec<(K, Pending<T>)> = due_keys
            .into_iter()
            .filter_map(|key| self.pending.remove(&key).map(|task| (key, task)))
            .collect();
        fired.sort_by_key(|(_, task)| (task.due, task.seq));

        fired
            .into_iter()
            .map(|(key, task)| (key, task.payload))
            .collect()
    }
}
