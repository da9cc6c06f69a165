//! A small game that records what the scheduler makes it do.

use chrono::TimeDelta;
use flume::{Receiver, Sender};
use quill_engine::{
    ActionRegistry, ConnectionId, Control, Deferred, Game, NewConnection, SchedulerConfig,
    TickContext, TurnScheduler,
};
use quill_foundation::{EntityId, Error, Result, Value};

#[derive(Default)]
pub struct Recorder {
    pub commands: Vec<String>,
    pub fired: Vec<(String, i64)>,
    pub beats: Vec<EntityId>,
    pub gone: Vec<EntityId>,
    pub left: Vec<ConnectionId>,
}

impl Game for Recorder {
    fn process_command(
        &mut self,
        ctx: &mut TickContext<'_, Self>,
        conn: ConnectionId,
        _actor: Option<EntityId>,
        line: &str,
    ) -> Result<()> {
        self.commands.push(line.to_string());
        if let Some(rest) = line.strip_prefix("wait ") {
            let minutes: i64 = rest.parse().map_err(|_| Error::invalid_input("minutes"))?;
            ctx.request(Control::Wait(TimeDelta::minutes(minutes)));
        } else if line == "ask" {
            ctx.start_dialog(conn, crate::dialogs::Survey::default());
        } else if line == "fail" {
            return Err(Error::internal("command failed"));
        } else {
            ctx.tell_connection(conn, format!("ok {line}"));
        }
        Ok(())
    }

    fn disconnected(&mut self, _ctx: &mut TickContext<'_, Self>, conn: ConnectionId, _actor: Option<EntityId>) {
        self.left.push(conn);
    }

    fn heartbeat(&mut self, _ctx: &mut TickContext<'_, Self>, owner: EntityId) -> Result<()> {
        self.beats.push(owner);
        Ok(())
    }

    fn owner_exists(&self, owner: EntityId) -> bool {
        !self.gone.contains(&owner)
    }
}

fn record(game: &mut Recorder, _ctx: &mut TickContext<'_, Recorder>, entry: &Deferred) -> Result<()> {
    let tag = entry.args.first().and_then(Value::as_int).unwrap_or(-1);
    game.fired.push((entry.action.clone(), tag));
    Ok(())
}

/// Reschedules itself one second later until its argument reaches zero.
fn countdown(game: &mut Recorder, ctx: &mut TickContext<'_, Recorder>, entry: &Deferred) -> Result<()> {
    let left = entry.args.first().and_then(Value::as_int).unwrap_or(0);
    game.fired.push((entry.action.clone(), left));
    if left > 0 {
        let due = ctx.now() + TimeDelta::seconds(1);
        ctx.defer(due, entry.owner, "countdown", vec![Value::Int(left - 1)]);
    }
    Ok(())
}

pub fn actions() -> ActionRegistry<Recorder> {
    ActionRegistry::new()
        .with("record", record)
        .with("other", record)
        .with("countdown", countdown)
}

pub fn scheduler(config: SchedulerConfig) -> TurnScheduler<Recorder> {
    TurnScheduler::new(config, Recorder::default(), actions())
}

pub fn connect(sched: &mut TurnScheduler<Recorder>) -> (ConnectionId, Sender<String>, Receiver<String>) {
    let (new, input, output) = NewConnection::channel();
    let id = sched.connect(new).unwrap();
    (id, input, output)
}

pub fn drain(output: &Receiver<String>) -> Vec<String> {
    output
        .try_iter()
        .flat_map(|chunk| chunk.lines().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

pub fn entity(n: u64) -> EntityId {
    EntityId::new(n, 0)
}
