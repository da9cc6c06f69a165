//! Deferred action handlers, looked up by name when an action fires.
//!
//! Deferred entries store a handler name rather than a closure so a queue
//! can be snapshotted and restored into a process that registered the same
//! names.

use std::collections::HashMap;
use std::fmt;

use quill_foundation::{Error, Result};

use crate::context::TickContext;
use crate::deferred::Deferred;

/// A deferred action handler.
pub type ActionFn<G> = fn(&mut G, &mut TickContext<'_, G>, &Deferred) -> Result<()>;

/// Name-to-handler table.
pub struct ActionRegistry<G> {
    actions: HashMap<String, ActionFn<G>>,
}

impl<G> Default for ActionRegistry<G> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }
}

impl<G> fmt::Debug for ActionRegistry<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}

impl<G> ActionRegistry<G> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, handler: ActionFn<G>) {
        self.actions.insert(name.into(), handler);
    }

    /// Builder form of [`Self::register`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, handler: ActionFn<G>) -> Self {
        self.register(name, handler);
        self
    }

    /// True if `name` has a handler.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Looks up the handler for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`quill_foundation::ErrorKind::UnknownAction`] if nothing is registered.
    pub fn resolve(&self, name: &str) -> Result<ActionFn<G>> {
        self.actions
            .get(name)
            .copied()
            .ok_or_else(|| Error::unknown_action(name))
    }
}
