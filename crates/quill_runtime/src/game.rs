//! The demo game: the house, its cat, and the players in it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Timelike;
use quill_engine::{
    ActionRegistry, ConnectionId, Game, Mode, SchedulerConfig, SchedulerSnapshot, TickContext,
    TurnScheduler,
};
use quill_foundation::{EntityId, Gender, Result, Value};
use quill_soul::Soul;
use tracing::info;

use crate::actions;
use crate::commands;
use crate::login::LoginDialog;
use crate::serialize;
use crate::world::{Landmarks, World};

/// Game state driven by the scheduler.
#[derive(Debug)]
pub struct DemoGame {
    pub(crate) world: World,
    pub(crate) landmarks: Landmarks,
    pub(crate) soul: Soul,
    pub(crate) mode: Mode,
    save_path: Option<PathBuf>,
    wizards: HashMap<String, String>,
    last_hour: Option<u32>,
}

impl Default for DemoGame {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoGame {
    /// Creates the game with a fresh house.
    #[must_use]
    pub fn new() -> Self {
        let (world, landmarks) = World::house();
        Self {
            world,
            landmarks,
            soul: Soul::new(),
            mode: Mode::SingleActor,
            save_path: None,
            wizards: HashMap::new(),
            last_hour: None,
        }
    }

    /// Sets the mode, which decides whether `wait` is allowed.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables `save`, writing snapshots to `path`.
    #[must_use]
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    /// Lets `name` log in as a wizard with `password`.
    #[must_use]
    pub fn with_wizard(mut self, name: &str, password: &str) -> Self {
        self.wizards.insert(name.to_lowercase(), password.to_string());
        self
    }

    /// The world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Notable ids of the house.
    #[must_use]
    pub fn landmarks(&self) -> Landmarks {
        self.landmarks
    }

    /// The interpreter.
    #[must_use]
    pub fn soul(&self) -> &Soul {
        &self.soul
    }

    pub(crate) fn is_wizard(&self, name: &str) -> bool {
        self.wizards.contains_key(name)
    }

    pub(crate) fn check_password(&self, name: &str, password: &str) -> bool {
        self.wizards.get(name).is_some_and(|p| p == password)
    }

    /// Schedules the cat and starts the clock chiming. Call once on a fresh
    /// game; a restored snapshot already carries both.
    pub fn start(&mut self, ctx: &mut TickContext<'_, Self>) {
        ctx.defer_in(
            Duration::from_secs(2),
            self.landmarks.cat,
            actions::CAT_PURR,
            vec![Value::Int(0)],
        );
        ctx.register_periodic(self.landmarks.clock);
    }

    /// Puts a new player in the living room and shows them around.
    pub(crate) fn enter(&mut self, ctx: &mut TickContext<'_, Self>, name: &str, gender: Gender) -> EntityId {
        let actor = self
            .world
            .add_living(self.landmarks.living_room, name, gender, &[]);
        let title = self.world.title(actor);
        self.tell_others(ctx, actor, &format!("{title} arrives."));
        ctx.tell(actor, format!("Welcome, {title}."));
        for line in self.world.look(actor) {
            ctx.tell(actor, line);
        }
        info!(%actor, name, "player entered");
        actor
    }

    /// Sends `text` to every living sharing a room with `actor`.
    pub(crate) fn tell_others(&self, ctx: &mut TickContext<'_, Self>, actor: EntityId, text: &str) {
        for other in self.world.others_near(actor) {
            ctx.tell(other, text);
        }
    }

    fn chime(&mut self, ctx: &mut TickContext<'_, Self>) {
        let hour = ctx.now().hour();
        if self.last_hour == Some(hour) {
            return;
        }
        if self.last_hour.is_some() {
            let strikes = match hour % 12 {
                0 => 12,
                h => h,
            };
            let text = if strikes == 1 {
                "The grandfather clock chimes once.".to_string()
            } else {
                format!("The grandfather clock chimes {strikes} times.")
            };
            if let Some(room) = self.world.location_of(self.landmarks.clock) {
                for living in self.world.livings_in(room) {
                    ctx.tell(living, text.clone());
                }
            }
        }
        self.last_hour = Some(hour);
    }
}

impl Game for DemoGame {
    fn process_command(
        &mut self,
        ctx: &mut TickContext<'_, Self>,
        conn: ConnectionId,
        actor: Option<EntityId>,
        line: &str,
    ) -> Result<()> {
        let Some(actor) = actor else {
            ctx.tell_connection(conn, "You are not logged in.");
            return Ok(());
        };
        commands::dispatch(self, ctx, conn, actor, line)
    }

    fn connected(&mut self, ctx: &mut TickContext<'_, Self>, conn: ConnectionId) -> Result<()> {
        ctx.tell_connection(conn, "Welcome. We would like to know your player name before you can continue.");
        ctx.start_dialog(conn, LoginDialog::new());
        Ok(())
    }

    fn disconnected(&mut self, ctx: &mut TickContext<'_, Self>, _conn: ConnectionId, actor: Option<EntityId>) {
        let Some(actor) = actor else {
            return;
        };
        let title = self.world.title(actor);
        self.tell_others(ctx, actor, &format!("{title} leaves the game."));
        self.world.remove(actor);
        self.soul.forget(actor);
        ctx.remove_deferreds(actor);
        ctx.unregister_periodic(actor);
        info!(%actor, "player left");
    }

    fn heartbeat(&mut self, ctx: &mut TickContext<'_, Self>, owner: EntityId) -> Result<()> {
        if owner == self.landmarks.clock {
            self.chime(ctx);
        }
        Ok(())
    }

    fn owner_exists(&self, owner: EntityId) -> bool {
        self.world.contains(owner)
    }

    fn save(
        &mut self,
        ctx: &mut TickContext<'_, Self>,
        conn: ConnectionId,
        snapshot: &SchedulerSnapshot,
    ) -> Result<()> {
        let Some(path) = &self.save_path else {
            ctx.tell_connection(conn, "It is not possible to save your progress.");
            return Ok(());
        };
        serialize::save_snapshot(snapshot, path)?;
        ctx.tell_connection(conn, "Game saved.");
        ctx.tell_connection(conn, format!("Game time: {}", snapshot.clock));
        Ok(())
    }
}

/// Builds a scheduler around `game` with the demo's deferred actions.
///
/// When `snapshot` is given it is restored; otherwise the game is started
/// fresh.
#[must_use]
pub fn scheduler(
    config: SchedulerConfig,
    game: DemoGame,
    snapshot: Option<SchedulerSnapshot>,
) -> TurnScheduler<DemoGame> {
    let registry: ActionRegistry<DemoGame> = actions::registry();
    let mut sched = TurnScheduler::new(config, game, registry);
    match snapshot {
        Some(snapshot) => sched.restore(snapshot),
        None => sched.with_context(DemoGame::start),
    }
    sched
}
