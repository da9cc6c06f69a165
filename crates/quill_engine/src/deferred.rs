//! Deferred actions.
//!
//! A deferred action names a handler, an owner, and arguments, and is due at
//! a game time. The queue is shared between the tick loop and any thread
//! that schedules work; every operation takes the lock briefly and never
//! runs a handler while holding it.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDateTime;
use quill_foundation::{EntityId, Value};
use serde::{Deserialize, Serialize};

/// An action scheduled for a game time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    /// Game time the action becomes due.
    pub due: NaiveDateTime,
    /// Entity the action belongs to. A null owner never goes stale.
    pub owner: EntityId,
    /// Registered handler name.
    pub action: String,
    /// Arguments passed to the handler.
    pub args: Vec<Value>,
    /// Insertion sequence, breaks ties between equal due times.
    pub seq: u64,
}

impl Deferred {
    fn key(&self) -> (NaiveDateTime, u64) {
        (self.due, self.seq)
    }
}

// Min-heap ordering on (due, seq).
#[derive(Debug)]
struct Queued(Deferred);

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.0.key() == other.0.key()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.key().cmp(&self.0.key())
    }
}

#[derive(Debug, Default)]
struct Inner {
    heap: BinaryHeap<Queued>,
    next_seq: u64,
}

/// Shared priority queue of deferred actions, ordered by due time.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Debug, Default)]
pub struct DeferredQueue {
    inner: Arc<Mutex<Inner>>,
}

impl DeferredQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Schedules `action` for `owner` at `due`. Returns its sequence number.
    pub fn push(
        &self,
        due: NaiveDateTime,
        owner: EntityId,
        action: impl Into<String>,
        args: Vec<Value>,
    ) -> u64 {
        let mut inner = self.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.heap.push(Queued(Deferred {
            due,
            owner,
            action: action.into(),
            args,
            seq,
        }));
        seq
    }

    /// Removes and returns the earliest action due at or before `now`.
    pub fn pop_due(&self, now: NaiveDateTime) -> Option<Deferred> {
        let mut inner = self.lock();
        if inner.heap.peek().is_some_and(|q| q.0.due <= now) {
            inner.heap.pop().map(|q| q.0)
        } else {
            None
        }
    }

    /// Due time of the earliest action.
    #[must_use]
    pub fn next_due(&self) -> Option<NaiveDateTime> {
        self.lock().heap.peek().map(|q| q.0.due)
    }

    /// Drops every action owned by `owner`. Returns how many were removed.
    pub fn remove_owner(&self, owner: EntityId) -> usize {
        let mut inner = self.lock();
        let before = inner.heap.len();
        let kept: Vec<Queued> = std::mem::take(&mut inner.heap)
            .into_vec()
            .into_iter()
            .filter(|q| q.0.owner != owner)
            .collect();
        inner.heap = BinaryHeap::from(kept);
        before - inner.heap.len()
    }

    /// Number of pending actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().heap.len()
    }

    /// True if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().heap.is_empty()
    }

    /// Copies every pending action in firing order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Deferred> {
        let inner = self.lock();
        let mut entries: Vec<Deferred> = inner.heap.iter().map(|q| q.0.clone()).collect();
        entries.sort_by_key(Deferred::key);
        entries
    }

    /// Replaces the queue contents. Later pushes sort after every restored entry.
    pub fn restore(&self, entries: Vec<Deferred>) {
        let mut inner = self.lock();
        inner.next_seq = entries.iter().map(|d| d.seq + 1).max().unwrap_or(0);
        inner.heap = entries.into_iter().map(Queued).collect();
    }
}
