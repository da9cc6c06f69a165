//! Time and turn machinery for Quill.
//!
//! This crate provides:
//! - [`GameClock`] - Game time that runs faster, slower, or not at all
//! - [`DeferredQueue`] - Thread-safe queue of actions due at a game time
//! - [`ActionRegistry`] - Deferred action names resolved to handlers at fire time
//! - [`Dialog`] - Multi-step prompts as resumable state machines
//! - [`TurnScheduler`] - The tick loop in single-actor and multi-actor modes
//!
//! # Tick order
//!
//! ```text
//! (a) resume dialogs waiting for input
//! (b) dispatch one queued command per connection
//! (c) sync buffered events into connection output
//! (d) advance the clock, run heartbeats, fire due deferreds
//! (e) flush output
//! (f) evict idle connections
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod clock;
pub mod config;
pub mod connection;
pub mod context;
pub mod deferred;
pub mod dialog;
pub mod game;
pub mod scheduler;
pub mod snapshot;

pub use action::{ActionFn, ActionRegistry};
pub use clock::GameClock;
pub use config::{Mode, SchedulerConfig, TickMethod};
pub use connection::{Connection, ConnectionId, NewConnection, OutputSink, Role};
pub use context::{Control, Event, Recipient, TickContext};
pub use deferred::{Deferred, DeferredQueue};
pub use dialog::{Dialog, DialogStep, DialogTable, InputRequest, Validator};
pub use game::Game;
pub use scheduler::{StopHandle, TurnScheduler};
pub use snapshot::SchedulerSnapshot;
