//! Error types for Quill.
//!
//! Uses `thiserror`. User-facing parse outcomes of the interpreter are not
//! errors of this kind; they live in the soul crate. This type covers
//! failures of the machinery around it.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;

/// The main error type for Quill operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput(message.into()))
    }

    /// Creates an error for a deferred action name nobody registered.
    #[must_use]
    pub fn unknown_action(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownAction(name.into()))
    }

    /// Creates an error for a second dialog started on one connection.
    #[must_use]
    pub fn dialog_already_active(connection: impl Into<String>) -> Self {
        Self::new(ErrorKind::DialogAlreadyActive(connection.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::IoError(e.to_string()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Entity was not found in the world.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Input did not satisfy what was asked for.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Deferred action name has no registered handler.
    #[error("unknown deferred action: {0}")]
    UnknownAction(String),

    /// A connection already has a dialog waiting for input.
    #[error("connection {0} already has a dialog in progress")]
    DialogAlreadyActive(String),

    /// Snapshot encoding or decoding failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Filesystem or socket failure.
    #[error("io error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Component or command that failed.
    pub source: Option<String>,
    /// Actor on whose behalf the work ran.
    pub actor: Option<EntityId>,
    /// Breadcrumbs, innermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing component.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the actor.
    #[must_use]
    pub fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Adds a breadcrumb.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
        }
        if let Some(actor) = self.actor {
            write!(f, " (actor {actor})")?;
        }
        for frame in &self.stack {
            write!(f, "\n  at {frame}")?;
        }
        Ok(())
    }
}
