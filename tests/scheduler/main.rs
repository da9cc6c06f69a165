//! Turn scheduler tests
//!
//! Drives `TurnScheduler` step by step over in-memory connections.

mod deferreds;
mod dialogs;
mod harness;
mod idle;
mod persistence;
