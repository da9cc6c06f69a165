//! Multi-step prompts.
//!
//! A dialog is a state machine that the scheduler resumes with each answer.
//! While a connection has a dialog waiting, its input goes to the dialog
//! instead of the command parser.

use std::collections::HashMap;
use std::fmt;

use quill_foundation::{Error, Result, Value};
use tracing::debug;

use crate::connection::ConnectionId;
use crate::context::TickContext;

/// Checks and converts an answer. `Err` carries the message shown before
/// the prompt is repeated; an empty message means the default one.
pub type Validator = fn(&str) -> std::result::Result<Value, String>;

/// Shown when a validator rejects an answer without its own message.
pub const DEFAULT_INVALID: &str = "That is not a valid answer.";

/// A question put to the player.
#[derive(Clone, Debug)]
pub struct InputRequest {
    /// Prompt text.
    pub prompt: String,
    /// Whether the answer is echoed.
    pub echo: bool,
    /// Optional validation and conversion.
    pub validator: Option<Validator>,
}

impl InputRequest {
    /// Creates an echoed request without validation.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            echo: true,
            validator: None,
        }
    }

    /// Validates answers with `validator`.
    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Hides the answer while it is typed.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.echo = false;
        self
    }
}

/// What a dialog wants next.
#[derive(Debug)]
pub enum DialogStep {
    /// Ask this and resume with the answer.
    Ask(InputRequest),
    /// Done.
    Finished,
}

/// A resumable multi-step interaction.
pub trait Dialog<G>: Send {
    /// Advances the dialog. `input` is `None` on the first call and the
    /// validated answer afterwards.
    ///
    /// # Errors
    ///
    /// Errors abort the dialog and are reported to the connection.
    fn resume(
        &mut self,
        game: &mut G,
        ctx: &mut TickContext<'_, G>,
        conn: ConnectionId,
        input: Option<Value>,
    ) -> Result<DialogStep>;
}

struct Pending<G> {
    dialog: Box<dyn Dialog<G>>,
    request: InputRequest,
}

/// Dialogs waiting for input, at most one per connection.
pub struct DialogTable<G> {
    pending: HashMap<ConnectionId, Pending<G>>,
}

impl<G> Default for DialogTable<G> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<G> fmt::Debug for DialogTable<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut waiting: Vec<_> = self.pending.keys().collect();
        waiting.sort();
        f.debug_struct("DialogTable")
            .field("waiting", &waiting)
            .finish()
    }
}

impl<G> DialogTable<G> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `conn` has a dialog waiting for input.
    #[must_use]
    pub fn is_waiting(&self, conn: ConnectionId) -> bool {
        self.pending.contains_key(&conn)
    }

    /// Number of waiting dialogs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True if no dialog is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops the dialog waiting on `conn`, if any.
    pub fn remove(&mut self, conn: ConnectionId) -> bool {
        self.pending.remove(&conn).is_some()
    }

    /// Drops every waiting dialog.
    pub fn discard_all(&mut self) {
        self.pending.clear();
    }

    /// Runs `dialog` to its first prompt.
    ///
    /// # Errors
    ///
    /// Fails if `conn` already has a dialog waiting, or if the dialog fails.
    pub fn start(
        &mut self,
        conn: ConnectionId,
        dialog: Box<dyn Dialog<G>>,
        game: &mut G,
        ctx: &mut TickContext<'_, G>,
    ) -> Result<()> {
        if self.is_waiting(conn) {
            return Err(Error::dialog_already_active(conn.to_string()));
        }
        debug!(connection = %conn, "dialog started");
        self.advance(conn, dialog, game, ctx, None)
    }

    /// Feeds one line of input to the dialog waiting on `conn`.
    ///
    /// A rejected answer repeats the prompt and keeps the dialog waiting.
    ///
    /// # Errors
    ///
    /// Errors from the dialog itself; the dialog is dropped.
    pub fn feed(
        &mut self,
        conn: ConnectionId,
        line: &str,
        game: &mut G,
        ctx: &mut TickContext<'_, G>,
    ) -> Result<()> {
        let Some(pending) = self.pending.remove(&conn) else {
            return Ok(());
        };
        if !pending.request.echo {
            ctx.set_echo(conn, true);
        }
        let answer = match pending.request.validator {
            None => Value::Str(line.trim().to_string()),
            Some(validate) => match validate(line.trim()) {
                Ok(value) => value,
                Err(message) => {
                    let message = if message.is_empty() {
                        DEFAULT_INVALID.to_string()
                    } else {
                        message
                    };
                    ctx.tell_connection(conn, message);
                    Self::prompt(conn, &pending.request, ctx);
                    self.pending.insert(conn, pending);
                    return Ok(());
                }
            },
        };
        self.advance(conn, pending.dialog, game, ctx, Some(answer))
    }

    fn advance(
        &mut self,
        conn: ConnectionId,
        mut dialog: Box<dyn Dialog<G>>,
        game: &mut G,
        ctx: &mut TickContext<'_, G>,
        input: Option<Value>,
    ) -> Result<()> {
        match dialog.resume(game, ctx, conn, input)? {
            DialogStep::Ask(request) => {
                Self::prompt(conn, &request, ctx);
                self.pending.insert(conn, Pending { dialog, request });
            }
            DialogStep::Finished => debug!(connection = %conn, "dialog finished"),
        }
        Ok(())
    }

    fn prompt(conn: ConnectionId, request: &InputRequest, ctx: &mut TickContext<'_, G>) {
        ctx.tell_connection(conn, request.prompt.clone());
        if !request.echo {
            ctx.set_echo(conn, false);
        }
    }
}
