//! The seam between the scheduler and a game.

use quill_foundation::{EntityId, Result};

use crate::connection::ConnectionId;
use crate::context::TickContext;
use crate::snapshot::SchedulerSnapshot;

/// Game logic driven by a [`crate::TurnScheduler`].
///
/// Every method runs on the scheduler thread inside a tick. Errors returned
/// from [`Game::process_command`] are reported to the connection that sent
/// the command; the tick continues for everyone else.
pub trait Game: Sized {
    /// Handles one line of input from `conn`. `actor` is `None` until the
    /// connection is bound.
    ///
    /// # Errors
    ///
    /// Any failure; shown to the connection as an internal error.
    fn process_command(
        &mut self,
        ctx: &mut TickContext<'_, Self>,
        conn: ConnectionId,
        actor: Option<EntityId>,
        line: &str,
    ) -> Result<()>;

    /// A connection was accepted. Typically starts a login dialog.
    ///
    /// # Errors
    ///
    /// Failures are logged and the connection is dropped.
    fn connected(&mut self, _ctx: &mut TickContext<'_, Self>, _conn: ConnectionId) -> Result<()> {
        Ok(())
    }

    /// A connection went away, by request, eviction, or transport failure.
    fn disconnected(
        &mut self,
        _ctx: &mut TickContext<'_, Self>,
        _conn: ConnectionId,
        _actor: Option<EntityId>,
    ) {
    }

    /// Called once per server tick for each registered periodic owner.
    ///
    /// # Errors
    ///
    /// Failures are logged.
    fn heartbeat(&mut self, _ctx: &mut TickContext<'_, Self>, _owner: EntityId) -> Result<()> {
        Ok(())
    }

    /// False once `owner` has been destroyed. Deferred actions of missing
    /// owners are skipped.
    fn owner_exists(&self, _owner: EntityId) -> bool {
        true
    }

    /// Stores a snapshot requested through [`crate::Control::Save`] by `conn`.
    ///
    /// # Errors
    ///
    /// Failures are reported to the requesting connection.
    fn save(
        &mut self,
        _ctx: &mut TickContext<'_, Self>,
        _conn: ConnectionId,
        _snapshot: &SchedulerSnapshot,
    ) -> Result<()> {
        Ok(())
    }
}
