//! Game time.
//!
//! The clock holds a game datetime that advances by real elapsed time
//! multiplied by a speed factor. A factor of zero freezes it: only explicit
//! game-time adjustments move it. Arithmetic saturates at the ends of the
//! representable calendar instead of panicking.

use std::fmt;
use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Game clock with a configurable real-to-game speed factor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameClock {
    epoch: NaiveDateTime,
    now: NaiveDateTime,
    times_realtime: f64,
}

impl GameClock {
    /// Creates a clock at `epoch` running `times_realtime` times real speed.
    #[must_use]
    pub fn new(epoch: NaiveDateTime, times_realtime: f64) -> Self {
        Self {
            epoch,
            now: epoch,
            times_realtime: times_realtime.max(0.0),
        }
    }

    /// Current game time.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Game time the clock started at.
    #[must_use]
    pub fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }

    /// Game time elapsed since the epoch.
    #[must_use]
    pub fn elapsed(&self) -> TimeDelta {
        self.now - self.epoch
    }

    /// Speed factor.
    #[must_use]
    pub fn times_realtime(&self) -> f64 {
        self.times_realtime
    }

    /// Changes the speed factor. Negative factors are treated as zero.
    pub fn set_times_realtime(&mut self, factor: f64) {
        self.times_realtime = factor.max(0.0);
    }

    /// True when real time does not move the clock.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.times_realtime <= 0.0
    }

    /// Advances by `real` elapsed real time, scaled by the speed factor.
    pub fn add_realtime(&mut self, real: Duration) {
        self.now = self.plus_realtime(real);
    }

    /// Moves back by `real` elapsed real time, scaled by the speed factor.
    pub fn sub_realtime(&mut self, real: Duration) {
        self.now = self.minus_realtime(real);
    }

    /// Advances by an exact amount of game time, ignoring the speed factor.
    pub fn add_gametime(&mut self, delta: TimeDelta) {
        self.now = offset(self.now, delta);
    }

    /// Moves back by an exact amount of game time.
    pub fn sub_gametime(&mut self, delta: TimeDelta) {
        self.now = offset(self.now, -delta);
    }

    /// Game time `real` from now, without changing the clock.
    #[must_use]
    pub fn plus_realtime(&self, real: Duration) -> NaiveDateTime {
        offset(self.now, self.scaled(real))
    }

    /// Game time `real` ago, without changing the clock.
    #[must_use]
    pub fn minus_realtime(&self, real: Duration) -> NaiveDateTime {
        offset(self.now, -self.scaled(real))
    }

    /// Game time that passes during `real` real time.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn scaled(&self, real: Duration) -> TimeDelta {
        let micros = real.as_secs_f64() * self.times_realtime * 1_000_000.0;
        TimeDelta::microseconds(micros.round() as i64)
    }
}

fn offset(at: NaiveDateTime, delta: TimeDelta) -> NaiveDateTime {
    at.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    })
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.now.format("%Y-%m-%d %H:%M:%S"))
    }
}
