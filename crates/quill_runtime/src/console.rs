//! The local console for single-player sessions.
//!
//! Reading happens on the calling thread through a [`LineEditor`]; the
//! scheduler runs elsewhere and prints through a [`ConsoleSink`]. After each
//! line the console waits briefly for the tick's output so the next prompt
//! lands below it.

use std::io::{self, Write};
use std::time::Duration;

use flume::{Receiver, Sender};
use quill_engine::{NewConnection, OutputSink, StopHandle};
use quill_foundation::{Error, ErrorKind, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Highlighter, Hinter, Validator};

/// Prompt shown before each command.
pub const PROMPT: &str = ">> ";

/// How long to wait for a tick's output before prompting again.
const OUTPUT_WAIT: Duration = Duration::from_millis(500);

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D.
    Eof,
}

/// Line input with history, so the console is not tied to one library.
pub trait LineEditor {
    /// Reads a line after showing `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Adds a line to history.
    fn add_history(&mut self, line: &str);
}

#[derive(Helper, Completer, Hinter, Validator, Highlighter)]
struct QuillHelper {
    #[rustyline(Completer)]
    completer: VerbCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

/// Completes the first word from the known verbs and commands.
struct VerbCompleter {
    words: Vec<String>,
}

impl Completer for VerbCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        let word = &line[start..pos];
        let candidates = self
            .words
            .iter()
            .filter(|w| w.starts_with(word))
            .map(|w| Pair {
                display: w.clone(),
                replacement: w.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

/// [`LineEditor`] backed by rustyline.
pub struct RustylineEditor {
    editor: Editor<QuillHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates an editor completing `words`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new(mut words: Vec<String>) -> Result<Self> {
        words.sort();
        words.dedup();
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(500)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();
        let helper = QuillHelper {
            completer: VerbCompleter { words },
            hinter: HistoryHinter::new(),
        };
        let mut editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        editor.set_helper(Some(helper));
        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::new(ErrorKind::Internal(e.to_string()))),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

/// Prints flushed output to stdout and signals that it did.
#[derive(Debug)]
pub struct ConsoleSink {
    flushed: Sender<()>,
}

impl OutputSink for ConsoleSink {
    fn send(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        let _ = self.flushed.send(());
        Ok(())
    }
}

/// The console's side of a connection.
#[derive(Debug)]
pub struct Console {
    input: Sender<String>,
    flushed: Receiver<()>,
}

impl Console {
    /// Creates the console and the connection the scheduler should accept.
    #[must_use]
    pub fn connect() -> (Self, NewConnection) {
        let (input_tx, input_rx) = flume::unbounded();
        let (flushed_tx, flushed_rx) = flume::unbounded();
        let connection = NewConnection::new(input_rx, Box::new(ConsoleSink { flushed: flushed_tx }));
        let console = Self {
            input: input_tx,
            flushed: flushed_rx,
        };
        (console, connection)
    }

    /// Reads lines and forwards them until end of input, Ctrl+C, or the
    /// scheduler stopping.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails.
    pub fn run(&self, editor: &mut dyn LineEditor, stop: &StopHandle) -> Result<()> {
        self.await_output();
        while !stop.is_stopped() {
            let line = match editor.read_line(PROMPT)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted | ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            editor.add_history(&line);
            while self.flushed.try_recv().is_ok() {}
            if self.input.send(line).is_err() {
                break;
            }
            self.await_output();
        }
        Ok(())
    }

    fn await_output(&self) {
        let _ = self.flushed.recv_timeout(OUTPUT_WAIT);
    }
}
