//! The login dialog: name, optional wizard password, gender, confirmation.

use quill_engine::{ConnectionId, Control, Dialog, DialogStep, InputRequest, Role, TickContext};
use quill_foundation::{Error, ErrorKind, Gender, Result, Value, lang};

use crate::game::DemoGame;

const NAME_PROMPT: &str = "Please type in your player name.";
const PASSWORD_PROMPT: &str = "Please type in the admin password.";
const GENDER_PROMPT: &str = "What is the gender of your player character (m/f/n)?";
const CONFIRM_PROMPT: &str = "You cannot change your name later. Do you want to create this character?";

#[derive(Clone, Debug, PartialEq)]
enum Step {
    Name,
    Password { name: String },
    Gender { name: String, role: Role },
    Confirm { name: String, gender: Gender, role: Role },
}

/// Creates a character for a new connection and binds it.
#[derive(Debug)]
pub struct LoginDialog {
    step: Step,
}

impl Default for LoginDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginDialog {
    /// Starts at the name prompt.
    #[must_use]
    pub fn new() -> Self {
        Self { step: Step::Name }
    }

    fn ask_name(&mut self) -> DialogStep {
        self.step = Step::Name;
        DialogStep::Ask(InputRequest::new(NAME_PROMPT).with_validator(accept_name))
    }

    fn ask_gender(&mut self, name: String, role: Role) -> DialogStep {
        self.step = Step::Gender { name, role };
        DialogStep::Ask(InputRequest::new(GENDER_PROMPT).with_validator(accept_gender))
    }
}

impl Dialog<DemoGame> for LoginDialog {
    fn resume(
        &mut self,
        game: &mut DemoGame,
        ctx: &mut TickContext<'_, DemoGame>,
        conn: ConnectionId,
        input: Option<Value>,
    ) -> Result<DialogStep> {
        let Some(answer) = input else {
            return Ok(self.ask_name());
        };
        let step = std::mem::replace(&mut self.step, Step::Name);
        let next = match step {
            Step::Name => {
                let name = answer.as_str().unwrap_or_default().to_string();
                if game.world().find_living(&name).is_some() {
                    ctx.tell_connection(conn, "That name is already taken.");
                    self.ask_name()
                } else if game.is_wizard(&name) {
                    self.step = Step::Password { name };
                    DialogStep::Ask(InputRequest::new(PASSWORD_PROMPT).hidden())
                } else {
                    self.ask_gender(name, Role::Player)
                }
            }
            Step::Password { name } => {
                if game.check_password(&name, answer.as_str().unwrap_or_default()) {
                    self.ask_gender(name, Role::Wizard)
                } else {
                    ctx.tell_connection(conn, "That password is not correct.");
                    self.ask_name()
                }
            }
            Step::Gender { name, role } => {
                let gender = lang::validate_gender(answer.as_str().unwrap_or_default())?;
                ctx.tell_connection(conn, format!(" name: {name},  gender: {gender}"));
                self.step = Step::Confirm { name, gender, role };
                DialogStep::Ask(InputRequest::new(CONFIRM_PROMPT).with_validator(accept_yesno))
            }
            Step::Confirm { name, gender, role } => {
                if answer.as_bool().unwrap_or(false) {
                    let actor = game.enter(ctx, &name, gender);
                    ctx.request(Control::Bind { conn, actor, role });
                    DialogStep::Finished
                } else {
                    ctx.tell_connection(conn, "Ok, let's get back to the beginning then.");
                    self.ask_name()
                }
            }
        };
        Ok(next)
    }
}

fn invalid_message(err: Error) -> String {
    match err.kind {
        ErrorKind::InvalidInput(message) => message,
        other => other.to_string(),
    }
}

fn accept_name(text: &str) -> std::result::Result<Value, String> {
    let name = text.trim();
    if !(3..=16).contains(&name.len()) {
        return Err("Names are 3 to 16 letters long.".to_string());
    }
    if !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err("Names may only contain letters.".to_string());
    }
    Ok(Value::Str(name.to_lowercase()))
}

fn accept_gender(text: &str) -> std::result::Result<Value, String> {
    lang::validate_gender(text)
        .map(|gender| Value::Str(gender.to_string()))
        .map_err(invalid_message)
}

fn accept_yesno(text: &str) -> std::result::Result<Value, String> {
    lang::yesno(text).map(Value::Bool).map_err(invalid_message)
}
