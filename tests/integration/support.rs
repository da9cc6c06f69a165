//! Connecting players to a demo scheduler.

use flume::{Receiver, Sender};
use quill_engine::{ConnectionId, NewConnection, SchedulerConfig, TurnScheduler};
use quill_runtime::{DemoGame, scheduler};

pub type Demo = TurnScheduler<DemoGame>;

pub struct Player {
    pub id: ConnectionId,
    pub input: Sender<String>,
    pub output: Receiver<String>,
}

impl Player {
    /// Sends a line and runs one tick without advancing the clock.
    pub fn say(&self, sched: &mut Demo, line: &str) {
        self.input.send(line.to_string()).unwrap();
        sched.step(false).unwrap();
    }

    /// Everything received since the last call, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        self.output
            .try_iter()
            .flat_map(|chunk| chunk.lines().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }
}

pub fn demo(config: SchedulerConfig) -> Demo {
    let game = DemoGame::new().with_mode(config.mode);
    scheduler(config, game, None)
}

pub fn connect(sched: &mut Demo) -> Player {
    let (new, input, output) = NewConnection::channel();
    let id = sched.connect(new).unwrap();
    Player { id, input, output }
}

/// Connects and creates a character, discarding the login chatter.
pub fn login(sched: &mut Demo, name: &str, gender: &str) -> Player {
    let player = connect(sched);
    player.say(sched, name);
    player.say(sched, gender);
    player.say(sched, "yes");
    player.lines();
    player
}
