//! Dialogs: prompts, validation, hidden input, interaction with commands.

use quill_engine::{
    ConnectionId, Dialog, DialogStep, InputRequest, NewConnection, OutputSink, SchedulerConfig,
    TickContext,
};
use quill_foundation::{Result, Value};

use crate::harness::{Recorder, connect, drain, scheduler};

fn positive(text: &str) -> std::result::Result<Value, String> {
    match text.parse::<i64>() {
        Ok(n) if n > 0 => Ok(Value::Int(n)),
        Ok(_) => Err("It has to be more than zero.".to_string()),
        Err(_) => Err(String::new()),
    }
}

/// Asks for a number, then a secret.
#[derive(Default)]
pub struct Survey {
    number: Option<i64>,
}

impl Dialog<Recorder> for Survey {
    fn resume(
        &mut self,
        game: &mut Recorder,
        ctx: &mut TickContext<'_, Recorder>,
        conn: ConnectionId,
        input: Option<Value>,
    ) -> Result<DialogStep> {
        let Some(value) = input else {
            return Ok(DialogStep::Ask(InputRequest::new("How many?").with_validator(positive)));
        };
        match self.number {
            None => {
                self.number = value.as_int();
                Ok(DialogStep::Ask(InputRequest::new("Secret?").hidden()))
            }
            Some(n) => {
                let secret = value.as_str().unwrap_or_default().to_string();
                game.commands.push(format!("survey {n} {secret}"));
                ctx.tell_connection(conn, "Thanks.");
                Ok(DialogStep::Finished)
            }
        }
    }
}

/// Records echo changes next to the text it receives.
struct Terminal {
    log: flume::Sender<String>,
}

impl OutputSink for Terminal {
    fn send(&mut self, text: &str) -> std::io::Result<()> {
        for line in text.lines() {
            let _ = self.log.send(line.to_string());
        }
        Ok(())
    }

    fn set_echo(&mut self, echo: bool) {
        let _ = self.log.send(format!("<echo {echo}>"));
    }
}

#[test]
fn invalid_answers_are_explained_and_asked_again() {
    let mut sched = scheduler(SchedulerConfig::default());
    let (input_tx, input_rx) = flume::unbounded();
    let (log_tx, log) = flume::unbounded();
    let id = sched
        .connect(NewConnection::new(input_rx, Box::new(Terminal { log: log_tx })))
        .unwrap();

    input_tx.send("ask".into()).unwrap();
    sched.step(false).unwrap();
    assert_eq!(drain(&log), ["How many?"]);

    input_tx.send("lots".into()).unwrap();
    sched.step(false).unwrap();
    assert_eq!(drain(&log), ["That is not a valid answer.", "How many?"]);

    input_tx.send("0".into()).unwrap();
    sched.step(false).unwrap();
    assert_eq!(drain(&log), ["It has to be more than zero.", "How many?"]);
    assert!(sched.in_dialog(id));

    input_tx.send(" 3 ".into()).unwrap();
    sched.step(false).unwrap();
    assert_eq!(drain(&log), ["<echo false>", "Secret?"]);

    input_tx.send("swordfish".into()).unwrap();
    sched.step(false).unwrap();
    assert_eq!(drain(&log), ["<echo true>", "Thanks."]);
    assert!(!sched.in_dialog(id));
    assert_eq!(sched.game().commands, ["ask", "survey 3 swordfish"]);
}

#[test]
fn answers_never_reach_the_command_handler() {
    let mut sched = scheduler(SchedulerConfig::default());
    let (_, input, output) = connect(&mut sched);
    let (_, other_in, other_out) = connect(&mut sched);

    input.send("ask".into()).unwrap();
    sched.step(false).unwrap();
    drain(&output);

    input.send("7".into()).unwrap();
    other_in.send("look".into()).unwrap();
    sched.step(false).unwrap();
    assert_eq!(sched.game().commands, ["ask", "look"]);
    assert_eq!(drain(&other_out), ["ok look"]);
    assert_eq!(drain(&output), ["Secret?"]);
}

#[test]
fn closing_a_connection_drops_its_dialog() {
    let mut sched = scheduler(SchedulerConfig::default());
    let (id, input, _output) = connect(&mut sched);
    input.send("ask".into()).unwrap();
    sched.step(false).unwrap();
    assert!(sched.in_dialog(id));

    drop(input);
    sched.step(false).unwrap();
    assert!(!sched.in_dialog(id));
    assert_eq!(sched.connection_count(), 0);
    assert_eq!(sched.game().left, [id]);
}
