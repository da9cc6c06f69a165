//! Scheduler configuration.

use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};

use crate::connection::Role;

/// How many actors share the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// One player at a local console.
    #[default]
    SingleActor,
    /// Many players over the network.
    MultiActor,
}

/// When the clock advances in single-actor mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TickMethod {
    /// Once per command typed.
    #[default]
    Command,
    /// On a fixed real-time interval, independent of input.
    Timer,
}

/// Longest game time a single `wait` may skip.
pub const DEFAULT_MAX_WAIT_HOURS: i64 = 24;

/// Settings for a [`crate::TurnScheduler`].
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Single or multi actor.
    pub mode: Mode,
    /// Command or timer ticks (single-actor only).
    pub tick_method: TickMethod,
    /// Real time per server tick.
    pub tick_interval: Duration,
    /// Game seconds per real second. Zero freezes the clock.
    pub time_factor: f64,
    /// Longest sleep between input checks in multi-actor mode.
    pub poll_slice: Duration,
    /// Idle timeout for players.
    pub idle_player: Duration,
    /// Idle timeout for wizards.
    pub idle_wizard: Duration,
    /// Game time at startup.
    pub epoch: NaiveDateTime,
    /// Upper bound on game time skipped by one wait.
    pub max_wait: TimeDelta,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::SingleActor,
            tick_method: TickMethod::Command,
            tick_interval: Duration::from_secs(1),
            time_factor: 1.0,
            poll_slice: Duration::from_millis(100),
            idle_player: Duration::from_secs(30 * 60),
            idle_wizard: Duration::from_secs(3 * 60 * 60),
            epoch: NaiveDateTime::default(),
            max_wait: TimeDelta::hours(DEFAULT_MAX_WAIT_HOURS),
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the tick method.
    #[must_use]
    pub fn with_tick_method(mut self, method: TickMethod) -> Self {
        self.tick_method = method;
        self
    }

    /// Sets the tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Sets the speed factor.
    #[must_use]
    pub fn with_time_factor(mut self, factor: f64) -> Self {
        self.time_factor = factor;
        self
    }

    /// Sets the poll slice.
    #[must_use]
    pub fn with_poll_slice(mut self, slice: Duration) -> Self {
        self.poll_slice = slice;
        self
    }

    /// Sets both idle timeouts.
    #[must_use]
    pub fn with_idle_timeouts(mut self, player: Duration, wizard: Duration) -> Self {
        self.idle_player = player;
        self.idle_wizard = wizard;
        self
    }

    /// Sets the starting game time.
    #[must_use]
    pub fn with_epoch(mut self, epoch: NaiveDateTime) -> Self {
        self.epoch = epoch;
        self
    }

    /// Sets the longest wait. Negative values allow no waiting at all.
    #[must_use]
    pub fn with_max_wait(mut self, max_wait: TimeDelta) -> Self {
        self.max_wait = max_wait.max(TimeDelta::zero());
        self
    }

    /// Idle timeout for `role`.
    #[must_use]
    pub fn idle_timeout(&self, role: Role) -> Duration {
        match role {
            Role::Player => self.idle_player,
            Role::Wizard => self.idle_wizard,
        }
    }
}
