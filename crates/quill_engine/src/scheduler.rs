//! The turn scheduler.
//!
//! One scheduler owns the game, the clock, the deferred queue, and every
//! connection. World state is touched only from the thread running the
//! loop; other threads reach it through connection channels and the shared
//! [`DeferredQueue`].

use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::TimeDelta;
use flume::{Receiver, TryRecvError};
use quill_foundation::{EntityId, Error, ErrorKind, Result};
use tracing::{debug, error, info, warn};

use crate::action::ActionRegistry;
use crate::clock::GameClock;
use crate::config::{Mode, SchedulerConfig, TickMethod};
use crate::connection::{Connection, ConnectionId, NewConnection};
use crate::context::{Control, Event, Recipient, TickContext, TickState};
use crate::deferred::DeferredQueue;
use crate::dialog::DialogTable;
use crate::game::Game;
use crate::snapshot::SchedulerSnapshot;

// =============================================================================
// Stop Handle
// =============================================================================

/// Stops a running scheduler from another thread.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Creates a handle that is not stopped yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the loop to stop after the current tick.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once a stop was requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Turn Scheduler
// =============================================================================

/// Runs ticks for a [`Game`].
pub struct TurnScheduler<G: Game> {
    config: SchedulerConfig,
    game: G,
    actions: ActionRegistry<G>,
    dialogs: DialogTable<G>,
    state: TickState<G>,
    connections: BTreeMap<ConnectionId, Connection>,
    incoming: Option<Receiver<NewConnection>>,
    next_connection: u64,
    stop: Arc<AtomicBool>,
    last_timer: Instant,
    ticks: u64,
    fatal: Option<Error>,
}

impl<G: Game> TurnScheduler<G> {
    /// Creates a scheduler with the clock at `config.epoch`.
    #[must_use]
    pub fn new(config: SchedulerConfig, game: G, actions: ActionRegistry<G>) -> Self {
        let clock = GameClock::new(config.epoch, config.time_factor);
        let mut state = TickState::new(clock, config.tick_interval);
        state.max_wait = config.max_wait;
        Self {
            config,
            game,
            actions,
            dialogs: DialogTable::new(),
            state,
            connections: BTreeMap::new(),
            incoming: None,
            next_connection: 1,
            stop: Arc::new(AtomicBool::new(false)),
            last_timer: Instant::now(),
            ticks: 0,
            fatal: None,
        }
    }

    /// Accepts connections from a transport thread.
    #[must_use]
    pub fn with_incoming(mut self, incoming: Receiver<NewConnection>) -> Self {
        self.incoming = Some(incoming);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The game.
    #[must_use]
    pub fn game(&self) -> &G {
        &self.game
    }

    /// The game, mutably. Only call between ticks.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    /// The game clock.
    #[must_use]
    pub fn clock(&self) -> &GameClock {
        &self.state.clock
    }

    /// Handle to the deferred queue, usable from any thread.
    #[must_use]
    pub fn deferreds(&self) -> DeferredQueue {
        self.state.deferreds.clone()
    }

    /// Owners receiving heartbeats, in registration order.
    #[must_use]
    pub fn periodic(&self) -> &[EntityId] {
        &self.state.periodic
    }

    /// Number of live connections.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// A live connection.
    #[must_use]
    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    /// True if `id` has a dialog waiting for input.
    #[must_use]
    pub fn in_dialog(&self, id: ConnectionId) -> bool {
        self.dialogs.is_waiting(id)
    }

    /// Ticks completed so far.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Handle for stopping the loop from elsewhere.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stop))
    }

    /// Runs `f` with a tick context outside any tick, for setup such as
    /// scheduling the first deferred actions. Requests it makes are applied
    /// before returning.
    pub fn with_context<R>(&mut self, f: impl FnOnce(&mut G, &mut TickContext<'_, G>) -> R) -> R {
        let result = {
            let mut ctx = TickContext::new(&mut self.state);
            f(&mut self.game, &mut ctx)
        };
        self.apply_requests();
        result
    }

    // -------------------------------------------------------------------------
    // Connections
    // -------------------------------------------------------------------------

    /// Adds a connection and lets the game greet it. Output produced by the
    /// greeting is flushed immediately.
    ///
    /// # Errors
    ///
    /// Returns the game's error if [`Game::connected`] fails; the connection
    /// is closed.
    pub fn connect(&mut self, new: NewConnection) -> Result<ConnectionId> {
        let id = ConnectionId(self.next_connection);
        self.next_connection += 1;
        self.connections.insert(id, Connection::new(id, new));
        info!(connection = %id, "connection accepted");

        let greeted = {
            let mut ctx = TickContext::new(&mut self.state);
            self.game.connected(&mut ctx, id)
        };
        if let Err(e) = greeted {
            error!(?e, connection = %id, "connection setup failed");
            self.disconnect(id);
            return Err(e);
        }
        self.apply_requests();
        self.flush_all();
        Ok(id)
    }

    fn accept_incoming(&mut self) {
        let Some(incoming) = self.incoming.clone() else {
            return;
        };
        loop {
            match incoming.try_recv() {
                Ok(new) => {
                    // Already logged by connect.
                    let _ = self.connect(new);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("transport stopped handing over connections");
                    self.incoming = None;
                    break;
                }
            }
        }
    }

    fn disconnect(&mut self, id: ConnectionId) {
        self.sync_events();
        let Some(mut conn) = self.connections.remove(&id) else {
            return;
        };
        conn.close();
        self.dialogs.remove(id);
        let mut ctx = TickContext::new(&mut self.state);
        self.game.disconnected(&mut ctx, id, conn.actor());
        info!(connection = %id, actor = ?conn.actor(), "connection closed");
    }

    // -------------------------------------------------------------------------
    // Ticks
    // -------------------------------------------------------------------------

    /// Runs one tick. `timer_elapsed` advances the clock by one tick interval,
    /// runs heartbeats, and fires due deferred actions.
    ///
    /// # Errors
    ///
    /// Returns a programming error detected during the tick, such as a second
    /// dialog on one connection. The tick still runs to completion.
    pub fn step(&mut self, timer_elapsed: bool) -> Result<()> {
        let mut answers = Vec::new();
        let mut commands = Vec::new();
        for (id, conn) in &mut self.connections {
            if let Some(line) = conn.next_line() {
                if self.dialogs.is_waiting(*id) {
                    answers.push((*id, line));
                } else {
                    commands.push((*id, conn.actor(), line));
                }
            }
        }

        // (a) dialogs
        for (id, line) in answers {
            let fed = {
                let mut ctx = TickContext::new(&mut self.state);
                self.dialogs.feed(id, &line, &mut self.game, &mut ctx)
            };
            if let Err(e) = fed {
                self.report(id, &e);
            }
        }
        self.apply_requests();

        // (b) one command per connection
        for (id, actor, line) in commands {
            let line = line.trim();
            if line.is_empty() || !self.connections.contains_key(&id) {
                continue;
            }
            debug!(connection = %id, command = line, "dispatch");
            let handled = {
                let mut ctx = TickContext::new(&mut self.state);
                self.game.process_command(&mut ctx, id, actor, line)
            };
            if let Err(e) = handled {
                self.report(id, &e);
            }
            self.apply_requests();
        }

        // (c) buffered events
        self.sync_events();

        // (d) clock
        if timer_elapsed {
            self.server_tick();
            self.apply_requests();
        }

        // (e) output
        self.flush_all();

        // (f) idle connections
        self.evict_idle();

        self.ticks += 1;
        match self.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn server_tick(&mut self) {
        self.state.clock.add_realtime(self.config.tick_interval);
        let owners = self.state.periodic.clone();
        for owner in owners {
            // Skip owners unregistered by an earlier heartbeat this tick.
            if !self.state.periodic.contains(&owner) {
                continue;
            }
            let mut ctx = TickContext::new(&mut self.state);
            if let Err(e) = self.game.heartbeat(&mut ctx, owner) {
                error!(?e, owner = %owner, "heartbeat failed");
            }
        }
        self.fire_due();
    }

    fn fire_due(&mut self) {
        let now = self.state.clock.now();
        while let Some(entry) = self.state.deferreds.pop_due(now) {
            if !entry.owner.is_null() && !self.game.owner_exists(entry.owner) {
                debug!(action = %entry.action, owner = %entry.owner, "owner gone, deferred skipped");
                continue;
            }
            let handler = match self.actions.resolve(&entry.action) {
                Ok(handler) => handler,
                Err(e) => {
                    error!(?e, owner = %entry.owner, "deferred action dropped");
                    continue;
                }
            };
            let mut ctx = TickContext::new(&mut self.state);
            if let Err(e) = handler(&mut self.game, &mut ctx, &entry) {
                error!(?e, action = %entry.action, owner = %entry.owner, "deferred action failed");
            }
        }
    }

    fn wait(&mut self, delta: TimeDelta) {
        if delta <= TimeDelta::zero() {
            return;
        }
        let delta = if delta > self.config.max_wait {
            warn!(requested = %delta, limit = %self.config.max_wait, "wait shortened");
            self.config.max_wait
        } else {
            delta
        };
        if self.state.clock.is_frozen() {
            self.state.clock.add_gametime(delta);
            self.server_tick();
            return;
        }
        let per_tick = self.state.clock.scaled(self.config.tick_interval);
        let Some(per_tick) = per_tick.num_microseconds().filter(|us| *us > 0) else {
            return;
        };
        let ticks = delta.num_microseconds().unwrap_or(i64::MAX) / per_tick;
        debug!(ticks, "waiting");
        for _ in 0..ticks {
            self.server_tick();
        }
    }

    fn report(&mut self, id: ConnectionId, e: &Error) {
        warn!(connection = %id, error = %e, "handler failed");
        self.state.events.push(Event::Text {
            to: Recipient::Connection(id),
            text: format!("* internal error:\n{e}"),
        });
    }

    fn apply_requests(&mut self) {
        loop {
            let dialogs = std::mem::take(&mut self.state.dialogs);
            let controls = std::mem::take(&mut self.state.controls);
            if dialogs.is_empty() && controls.is_empty() {
                break;
            }
            for (id, dialog) in dialogs {
                if !self.connections.contains_key(&id) {
                    debug!(connection = %id, "dialog for closed connection dropped");
                    continue;
                }
                let started = {
                    let mut ctx = TickContext::new(&mut self.state);
                    self.dialogs.start(id, dialog, &mut self.game, &mut ctx)
                };
                if let Err(e) = started {
                    self.report(id, &e);
                    if matches!(e.kind, ErrorKind::DialogAlreadyActive(_)) && self.fatal.is_none() {
                        self.fatal = Some(e);
                    }
                }
            }
            for control in controls {
                self.apply_control(control);
            }
        }
    }

    fn apply_control(&mut self, control: Control) {
        match control {
            Control::Wait(delta) => self.wait(delta),
            Control::Bind { conn, actor, role } => {
                if let Some(connection) = self.connections.get_mut(&conn) {
                    connection.bind(actor);
                    connection.set_role(role);
                    info!(connection = %conn, actor = %actor, ?role, "actor bound");
                }
            }
            Control::Disconnect(conn) => self.disconnect(conn),
            Control::Save(conn) => {
                let snapshot = self.snapshot();
                let saved = {
                    let mut ctx = TickContext::new(&mut self.state);
                    self.game.save(&mut ctx, conn, &snapshot)
                };
                if let Err(e) = saved {
                    self.report(conn, &e);
                }
            }
            Control::Shutdown => {
                info!("shutdown requested");
                self.stop.store(true, Ordering::SeqCst);
            }
        }
    }

    fn sync_events(&mut self) {
        for event in std::mem::take(&mut self.state.events) {
            match event {
                Event::Text { to, text } => match to {
                    Recipient::Connection(id) => {
                        if let Some(conn) = self.connections.get_mut(&id) {
                            conn.write(text);
                        }
                    }
                    Recipient::Actor(actor) => {
                        for conn in self.connections.values_mut() {
                            if conn.actor() == Some(actor) {
                                conn.write(text.clone());
                            }
                        }
                    }
                    Recipient::Everyone => {
                        for conn in self.connections.values_mut() {
                            conn.write(text.clone());
                        }
                    }
                },
                Event::Echo { conn, on } => {
                    if let Some(conn) = self.connections.get_mut(&conn) {
                        conn.set_echo(on);
                    }
                }
            }
        }
    }

    fn flush_all(&mut self) {
        self.sync_events();
        for conn in self.connections.values_mut() {
            conn.flush();
        }
    }

    fn evict_idle(&mut self) {
        let now = Instant::now();
        let multi = self.config.mode == Mode::MultiActor;
        let mut expired = Vec::new();
        for (id, conn) in &mut self.connections {
            if conn.is_closed() {
                expired.push(*id);
                continue;
            }
            let limit = self.config.idle_timeout(conn.role());
            if multi && conn.idle(now) >= limit {
                conn.write(format!(
                    "Automatic logout: You have been logged out because you've been idle for too long ({} minutes).",
                    limit.as_secs() / 60
                ));
                info!(connection = %id, "idle connection evicted");
                expired.push(*id);
            }
        }
        for id in expired {
            self.disconnect(id);
        }
    }

    // -------------------------------------------------------------------------
    // Loops
    // -------------------------------------------------------------------------

    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::SeqCst) || self.connections.values().all(Connection::is_closed)
    }

    fn any_input(&self) -> bool {
        self.connections.values().any(Connection::has_input)
    }

    fn wait_for_input(&mut self, timeout: Duration) -> bool {
        if self.any_input() {
            return true;
        }
        self.connections
            .values_mut()
            .next()
            .is_some_and(|conn| conn.wait_for_input(timeout))
    }

    fn take_timer(&mut self) -> bool {
        if self.last_timer.elapsed() >= self.config.tick_interval {
            self.last_timer = Instant::now();
            true
        } else {
            false
        }
    }

    /// Runs the single-actor loop until the player leaves or a stop is
    /// requested, then shuts down.
    ///
    /// In [`TickMethod::Command`] every line of input is one tick. In
    /// [`TickMethod::Timer`] the loop waits for input at most until the next
    /// tick is due.
    ///
    /// # Errors
    ///
    /// A programming error inside a tick stops the loop and is returned
    /// after output has been flushed.
    pub fn run_single_actor(&mut self) -> Result<()> {
        info!(method = ?self.config.tick_method, "single-actor loop started");
        self.last_timer = Instant::now();
        let result = loop {
            if self.should_stop() {
                break Ok(());
            }
            let timer_elapsed = match self.config.tick_method {
                TickMethod::Command => {
                    if !self.wait_for_input(self.config.poll_slice) {
                        continue;
                    }
                    true
                }
                TickMethod::Timer => {
                    let budget = self
                        .config
                        .tick_interval
                        .saturating_sub(self.last_timer.elapsed())
                        .max(Duration::from_millis(1));
                    self.wait_for_input(budget);
                    self.take_timer()
                }
            };
            if let Err(e) = self.step(timer_elapsed) {
                error!(?e, "fatal error in tick");
                break Err(e);
            }
        };
        self.shutdown();
        result
    }

    /// Runs the single-actor loop on its own thread, leaving the calling
    /// thread free for a UI. The scheduler is handed back when it stops.
    ///
    /// # Errors
    ///
    /// Fails if the thread cannot be spawned.
    pub fn spawn_single_actor(mut self) -> io::Result<JoinHandle<Result<Self>>>
    where
        G: Send + 'static,
    {
        thread::Builder::new()
            .name("quill-scheduler".into())
            .spawn(move || {
                self.run_single_actor()?;
                Ok(self)
            })
    }

    /// Runs the multi-actor loop on the calling thread until stopped.
    ///
    /// Sleeps in slices no longer than `poll_slice` until some connection
    /// has input or the tick interval has passed. Errors inside a tick are
    /// logged and the loop carries on.
    ///
    /// # Errors
    ///
    /// Currently always returns `Ok`; the signature leaves room for fatal
    /// transport errors.
    pub fn run_multi_actor(&mut self) -> Result<()> {
        info!(interval = ?self.config.tick_interval, "multi-actor loop started");
        self.last_timer = Instant::now();
        while !self.stop.load(Ordering::SeqCst) {
            self.accept_incoming();
            if !self.any_input() && self.last_timer.elapsed() < self.config.tick_interval {
                let remaining = self
                    .config
                    .tick_interval
                    .saturating_sub(self.last_timer.elapsed());
                thread::sleep(remaining.min(self.config.poll_slice));
                continue;
            }
            let timer_elapsed = self.take_timer();
            if let Err(e) = self.step(timer_elapsed) {
                error!(?e, "tick failed");
            }
        }
        self.shutdown();
        Ok(())
    }

    /// Flushes output, closes every connection, and discards waiting dialogs.
    pub fn shutdown(&mut self) {
        self.apply_requests();
        self.flush_all();
        let ids: Vec<ConnectionId> = self.connections.keys().copied().collect();
        for id in ids {
            self.disconnect(id);
        }
        self.dialogs.discard_all();
        self.state.dialogs.clear();
        self.stop.store(true, Ordering::SeqCst);
        info!(ticks = self.ticks, "scheduler stopped");
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Captures the clock, pending deferreds, and heartbeat owners.
    #[must_use]
    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            clock: self.state.clock.clone(),
            deferreds: self.state.deferreds.snapshot(),
            periodic: self.state.periodic.clone(),
        }
    }

    /// Replaces the clock, deferreds, and heartbeat owners.
    pub fn restore(&mut self, snapshot: SchedulerSnapshot) {
        info!(
            deferreds = snapshot.deferreds.len(),
            periodic = snapshot.periodic.len(),
            "scheduler state restored"
        );
        self.state.clock = snapshot.clock;
        self.state.deferreds.restore(snapshot.deferreds);
        self.state.periodic = snapshot.periodic;
    }
}
