//! Core types shared by every Quill layer.
//!
//! This crate provides:
//! - [`EntityId`] - Generational identifiers for livings, items, and exits
//! - [`Gender`] - Grammatical gender with pronoun forms
//! - [`Value`] - Serializable payloads for deferred actions and dialog replies
//! - [`Error`] - Error type with kinds and optional context
//! - [`lang`] - Small English helpers (joining, capitalization, possessives)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod gender;
pub mod lang;
pub mod value;

pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind};
pub use gender::Gender;
pub use value::Value;

/// Result type alias for Quill operations.
pub type Result<T> = std::result::Result<T, Error>;
