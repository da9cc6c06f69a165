//! Connections: one per player session.
//!
//! Input arrives on a `flume` channel fed by whatever owns the transport
//! (a console thread, a socket reader). Output is buffered during a tick
//! and handed to an [`OutputSink`] when the tick flushes.

use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::time::{Duration, Instant};

use flume::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use quill_foundation::EntityId;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Identifies a connection for the lifetime of the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Privilege level, which decides the idle timeout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Ordinary player.
    #[default]
    Player,
    /// Game administrator.
    Wizard,
}

/// Destination for flushed output.
pub trait OutputSink: Send {
    /// Writes one flushed batch of text.
    ///
    /// # Errors
    ///
    /// Returns an error when the peer has gone away.
    fn send(&mut self, text: &str) -> io::Result<()>;

    /// Turns local echo on or off, for password entry.
    fn set_echo(&mut self, _echo: bool) {}

    /// Releases the transport.
    fn close(&mut self) {}
}

impl OutputSink for Sender<String> {
    fn send(&mut self, text: &str) -> io::Result<()> {
        Sender::send(self, text.to_string())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "output receiver dropped"))
    }
}

/// A connection that has not been handed to the scheduler yet.
pub struct NewConnection {
    /// Lines typed by the player.
    pub input: Receiver<String>,
    /// Where output goes.
    pub sink: Box<dyn OutputSink>,
    /// Privilege level.
    pub role: Role,
}

impl NewConnection {
    /// Creates a connection from an input channel and a sink.
    #[must_use]
    pub fn new(input: Receiver<String>, sink: Box<dyn OutputSink>) -> Self {
        Self {
            input,
            sink,
            role: Role::Player,
        }
    }

    /// Creates a channel-backed connection.
    ///
    /// Returns the connection, the sender for its input lines, and the
    /// receiver of its flushed output.
    #[must_use]
    pub fn channel() -> (Self, Sender<String>, Receiver<String>) {
        let (input_tx, input_rx) = flume::unbounded();
        let (output_tx, output_rx) = flume::unbounded();
        (Self::new(input_rx, Box::new(output_tx)), input_tx, output_rx)
    }

    /// Sets the role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

impl fmt::Debug for NewConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewConnection")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// A live connection owned by the scheduler.
pub struct Connection {
    id: ConnectionId,
    actor: Option<EntityId>,
    role: Role,
    input: Receiver<String>,
    held: VecDeque<String>,
    sink: Box<dyn OutputSink>,
    output: Vec<String>,
    last_input: Instant,
    closed: bool,
}

impl Connection {
    /// Wraps a new connection under `id`.
    #[must_use]
    pub fn new(id: ConnectionId, new: NewConnection) -> Self {
        Self {
            id,
            actor: None,
            role: new.role,
            input: new.input,
            held: VecDeque::new(),
            sink: new.sink,
            output: Vec::new(),
            last_input: Instant::now(),
            closed: false,
        }
    }

    /// Connection ID.
    #[must_use]
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Bound actor, if login has finished.
    #[must_use]
    pub fn actor(&self) -> Option<EntityId> {
        self.actor
    }

    /// Binds an actor.
    pub fn bind(&mut self, actor: EntityId) {
        self.actor = Some(actor);
    }

    /// Privilege level.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Changes the privilege level.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// True once the input side disconnected or the sink failed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Takes the next queued line without blocking.
    pub fn next_line(&mut self) -> Option<String> {
        let line = match self.held.pop_front() {
            Some(line) => Some(line),
            None => match self.input.try_recv() {
                Ok(line) => Some(line),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    None
                }
            },
        };
        if line.is_some() {
            self.last_input = Instant::now();
        }
        line
    }

    /// True if a line is waiting.
    #[must_use]
    pub fn has_input(&self) -> bool {
        !self.held.is_empty() || !self.input.is_empty()
    }

    /// Blocks up to `timeout` for a line, keeping it queued for [`Self::next_line`].
    pub fn wait_for_input(&mut self, timeout: Duration) -> bool {
        if !self.held.is_empty() {
            return true;
        }
        match self.input.recv_timeout(timeout) {
            Ok(line) => {
                self.held.push_back(line);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                self.closed = true;
                false
            }
        }
    }

    /// Time since the last line arrived.
    #[must_use]
    pub fn idle(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_input)
    }

    /// Buffers a line of output.
    pub fn write(&mut self, text: impl Into<String>) {
        self.output.push(text.into());
    }

    /// Buffered output not yet flushed.
    #[must_use]
    pub fn pending_output(&self) -> &[String] {
        &self.output
    }

    /// Turns echo on or off at the sink.
    pub fn set_echo(&mut self, echo: bool) {
        self.sink.set_echo(echo);
    }

    /// Sends buffered output to the sink.
    pub fn flush(&mut self) {
        if self.output.is_empty() || self.closed {
            self.output.clear();
            return;
        }
        let mut text = self.output.join("\n");
        text.push('\n');
        self.output.clear();
        if let Err(e) = self.sink.send(&text) {
            warn!(connection = %self.id, error = %e, "output failed, closing connection");
            self.closed = true;
        }
    }

    /// Flushes and releases the transport.
    pub fn close(&mut self) {
        self.flush();
        self.sink.close();
        self.closed = true;
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("actor", &self.actor)
            .field("role", &self.role)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
