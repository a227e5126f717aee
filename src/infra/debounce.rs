//! Keyed debounce scheduling for deferred side effects.
//!
//! Each key has at most one pending task. Scheduling the same key again
//! supersedes the earlier task, which will never be returned. Nothing runs on
//! its own: the owner calls [`Debouncer::drain_due`] from its event loop.

use chrono::{DateTime, Duration, Utc};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

struct Pending<T> {
    fire_at: DateTime<Utc>,
    seq: u64,
    task: T,
}

pub struct Debouncer<K, T> {
    delay: Duration,
    pending: HashMap<K, Pending<T>>,
    heap: BinaryHeap<Reverse<(DateTime<Utc>, u64, K)>>,
    next_seq: u64,
}

impl<K, T> Debouncer<K, T>
where
    K: Clone + Eq + Hash + Ord,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` for `key` at `now + delay`.
    ///
    /// Returns true if an earlier pending task for the key was superseded.
    pub fn schedule(&mut self, key: K, task: T, now: DateTime<Utc>) -> bool {
        let fire_at = now + self.delay;
        let seq = self.next_seq;
        self.next_seq += 1;

        self.heap.push(Reverse((fire_at, seq, key.clone())));
        self.pending
            .insert(key, Pending { fire_at, seq, task })
            .is_some()
    }

    /// Drops the pending task for `key`, returning it.
    pub fn cancel(&mut self, key: &K) -> Option<T> {
        self.pending.remove(key).map(|p| p.task)
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

    /// Earliest deadline among live tasks.
    pub fn next_deadline(&mut self) -> Option<DateTime<Utc>> {
        self.pop_stale();
        self.heap.peek().map(|Reverse((t, _, _))| *t)
    }

    /// Removes and returns every task whose deadline is at or before `now`,
    /// earliest first.
    pub fn drain_due(&mut self, now: DateTime<Utc>) -> Vec<(K, T)> {
        let mut due = Vec::new();
        loop {
            self.pop_stale();
            let Some(Reverse((fire_at, _, key))) = self.heap.peek().cloned() else {
                break;
            };
            if fire_at > now {
                break;
            }
            let _ = self.heap.pop();
            if let Some(pending) = self.pending.remove(&key) {
                due.push((key, pending.task));
            }
        }
        due
    }

    fn pop_stale(&mut self) {
        while let Some(Reverse((fire_at, seq, key))) = self.heap.peek() {
            match self.pending.get(key) {
                Some(live) if live.seq == *seq && live.fire_at == *fire_at => break,
                _ => {
                    let _ = self.heap.pop();
                }
            }
        }
    }
}
