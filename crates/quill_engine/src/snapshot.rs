//! Scheduler state that survives a restart.

use quill_foundation::EntityId;
use serde::{Deserialize, Serialize};

use crate::clock::GameClock;
use crate::deferred::Deferred;

/// Clock, pending deferred actions, and heartbeat owners.
///
/// Connections and dialogs are not part of a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSnapshot {
    /// Game clock.
    pub clock: GameClock,
    /// Pending actions in firing order.
    pub deferreds: Vec<Deferred>,
    /// Entities receiving heartbeats, in registration order.
    pub periodic: Vec<EntityId>,
}
