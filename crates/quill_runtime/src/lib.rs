//! Demo world, front ends, and persistence for Quill.
//!
//! This crate provides:
//! - [`DemoGame`] - a small house with a cat and a clock, driven by the
//!   turn scheduler
//! - [`LoginDialog`] - the name/gender/confirm conversation every
//!   connection starts with
//! - [`Console`] and [`transport`] - line front ends for single-player
//!   and multi-player sessions
//! - [`save_snapshot`] / [`load_snapshot`] - scheduler persistence

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actions;
pub mod commands;
pub mod console;
pub mod game;
pub mod logging;
pub mod login;
pub mod serialize;
pub mod transport;
pub mod world;

pub use console::{Console, LineEditor, ReadResult, RustylineEditor};
pub use game::{DemoGame, scheduler};
pub use logging::init_tracing;
pub use login::LoginDialog;
pub use serialize::{from_bytes, load_snapshot, save_snapshot, to_bytes};
pub use transport::{Listener, TelnetSink, listen};
pub use world::{Landmarks, Room, World};
