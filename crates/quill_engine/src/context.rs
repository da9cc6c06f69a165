//! What a handler can touch during a tick.
//!
//! Handlers never write to connections directly. They push events and
//! control requests into the [`TickContext`]; the scheduler applies them
//! at fixed points of the tick.

use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};
use quill_foundation::{EntityId, Value};

use crate::clock::GameClock;
use crate::connection::{ConnectionId, Role};
use crate::deferred::DeferredQueue;
use crate::dialog::Dialog;

// =============================================================================
// Events and Control Requests
// =============================================================================

/// Who should see a line of output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recipient {
    /// Every connection bound to this actor.
    Actor(EntityId),
    /// One connection, bound or not.
    Connection(ConnectionId),
    /// Every connection.
    Everyone,
}

/// Buffered side effect for connections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A line of text.
    Text {
        /// Who sees it.
        to: Recipient,
        /// The line.
        text: String,
    },
    /// Local echo on or off.
    Echo {
        /// Affected connection.
        conn: ConnectionId,
        /// New echo state.
        on: bool,
    },
}

/// Request to the scheduler, applied after the handler returns.
#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    /// Let game time pass.
    Wait(TimeDelta),
    /// Attach an actor to a connection.
    Bind {
        /// Connection finishing login.
        conn: ConnectionId,
        /// Actor it now controls.
        actor: EntityId,
        /// Privilege level.
        role: Role,
    },
    /// Close a connection after flushing it.
    Disconnect(ConnectionId),
    /// Snapshot the scheduler and hand it to the game to store.
    Save(ConnectionId),
    /// Stop the loop at the end of this tick.
    Shutdown,
}

// =============================================================================
// Tick State
// =============================================================================

/// Scheduler state a handler may observe or extend.
pub(crate) struct TickState<G> {
    pub(crate) clock: GameClock,
    pub(crate) deferreds: DeferredQueue,
    pub(crate) periodic: Vec<EntityId>,
    pub(crate) events: Vec<Event>,
    pub(crate) dialogs: Vec<(ConnectionId, Box<dyn Dialog<G>>)>,
    pub(crate) controls: Vec<Control>,
    pub(crate) tick_interval: Duration,
    pub(crate) max_wait: TimeDelta,
}

impl<G> TickState<G> {
    pub(crate) fn new(clock: GameClock, tick_interval: Duration) -> Self {
        Self {
            clock,
            deferreds: DeferredQueue::new(),
            periodic: Vec::new(),
            events: Vec::new(),
            dialogs: Vec::new(),
            controls: Vec::new(),
            tick_interval,
            max_wait: TimeDelta::hours(crate::config::DEFAULT_MAX_WAIT_HOURS),
        }
    }
}

/// Handle given to command handlers, heartbeats, deferred actions, and dialogs.
pub struct TickContext<'a, G> {
    state: &'a mut TickState<G>,
}

impl<'a, G> TickContext<'a, G> {
    pub(crate) fn new(state: &'a mut TickState<G>) -> Self {
        Self { state }
    }

    // -------------------------------------------------------------------------
    // Time
    // -------------------------------------------------------------------------

    /// Current game time.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.state.clock.now()
    }

    /// The game clock.
    #[must_use]
    pub fn clock(&self) -> &GameClock {
        &self.state.clock
    }

    /// Game time that passes in one server tick.
    #[must_use]
    pub fn tick_gametime(&self) -> TimeDelta {
        self.state.clock.scaled(self.state.tick_interval)
    }

    /// Longest game time a [`Control::Wait`] may skip.
    #[must_use]
    pub fn max_wait(&self) -> TimeDelta {
        self.state.max_wait
    }

    // -------------------------------------------------------------------------
    // Deferred Actions
    // -------------------------------------------------------------------------

    /// Schedules `action` for `owner` at game time `due`.
    pub fn defer(
        &mut self,
        due: NaiveDateTime,
        owner: EntityId,
        action: impl Into<String>,
        args: Vec<Value>,
    ) -> u64 {
        self.state.deferreds.push(due, owner, action, args)
    }

    /// Schedules `action` after `real` real time at the current speed.
    pub fn defer_in(
        &mut self,
        real: Duration,
        owner: EntityId,
        action: impl Into<String>,
        args: Vec<Value>,
    ) -> u64 {
        let due = self.state.clock.plus_realtime(real);
        self.defer(due, owner, action, args)
    }

    /// Drops every pending action owned by `owner`.
    pub fn remove_deferreds(&mut self, owner: EntityId) -> usize {
        self.state.deferreds.remove_owner(owner)
    }

    /// Number of pending deferred actions.
    #[must_use]
    pub fn deferred_count(&self) -> usize {
        self.state.deferreds.len()
    }

    // -------------------------------------------------------------------------
    // Heartbeats
    // -------------------------------------------------------------------------

    /// Adds `owner` to the heartbeat list. Registering twice is a no-op.
    pub fn register_periodic(&mut self, owner: EntityId) {
        if !self.state.periodic.contains(&owner) {
            self.state.periodic.push(owner);
        }
    }

    /// Removes `owner` from the heartbeat list.
    pub fn unregister_periodic(&mut self, owner: EntityId) {
        self.state.periodic.retain(|p| *p != owner);
    }

    /// True if `owner` receives heartbeats.
    #[must_use]
    pub fn is_periodic(&self, owner: EntityId) -> bool {
        self.state.periodic.contains(&owner)
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Sends a line to every connection bound to `actor`.
    pub fn tell(&mut self, actor: EntityId, text: impl Into<String>) {
        self.push_text(Recipient::Actor(actor), text.into());
    }

    /// Sends a line to one connection.
    pub fn tell_connection(&mut self, conn: ConnectionId, text: impl Into<String>) {
        self.push_text(Recipient::Connection(conn), text.into());
    }

    /// Sends a line to every connection.
    pub fn broadcast(&mut self, text: impl Into<String>) {
        self.push_text(Recipient::Everyone, text.into());
    }

    /// Turns local echo on or off for one connection.
    pub fn set_echo(&mut self, conn: ConnectionId, on: bool) {
        self.state.events.push(Event::Echo { conn, on });
    }

    fn push_text(&mut self, to: Recipient, text: String) {
        self.state.events.push(Event::Text { to, text });
    }

    // -------------------------------------------------------------------------
    // Dialogs and Control
    // -------------------------------------------------------------------------

    /// Starts a dialog on `conn`. It runs to its first prompt after the
    /// current handler returns.
    pub fn start_dialog(&mut self, conn: ConnectionId, dialog: impl Dialog<G> + 'static) {
        self.state.dialogs.push((conn, Box::new(dialog)));
    }

    /// Queues a request for the scheduler.
    pub fn request(&mut self, control: Control) {
        self.state.controls.push(control);
    }
}
