//! End-to-end tests for Quill
//!
//! Players connect over in-memory channels, log in through the dialog, and
//! play in the demo house while the scheduler drives ticks by hand.

mod login;
mod persistence;
mod play;
mod support;
