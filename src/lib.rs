//! Quill - text adventure core
//!
//! This crate re-exports all layers of the Quill system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: quill_runtime    — demo world, dispatch, console/TCP transport, CLI
//! Layer 2: quill_engine     — game clock, deferred queue, dialogs, turn scheduler
//! Layer 1: quill_soul       — free-text emote interpreter ("soul")
//! Layer 0: quill_foundation — core types (EntityId, Gender, Value, Error)
//! ```

pub use quill_engine as engine;
pub use quill_foundation as foundation;
pub use quill_runtime as runtime;
pub use quill_soul as soul;
