//! Command dispatch: every line goes through the soul first.
//!
//! Soul emotes are rendered and delivered. Lines the soul hands back as
//! non-soul verbs are movement through an exit or one of the built-in
//! commands. Every interpreter outcome ends as exactly one feedback line.

use chrono::TimeDelta;
use quill_engine::{ConnectionId, Control, Mode, TickContext};
use quill_foundation::{EntityId, Result};
use quill_soul::{Kind, ParseResult, Scope, SoulError, words};

use crate::game::DemoGame;

/// Verbs handled here instead of by the soul.
pub const COMMANDS: &[&str] = &["look", "l", "wait", "time", "save", "quit", "help", "shutdown"];

/// Minutes waited when `wait` has no number.
const DEFAULT_WAIT_MINUTES: i64 = 10;

/// Verbs the cat enjoys.
const CAT_PLEASERS: &[&str] = &["pat", "cuddle", "hug", "kiss", "tickle"];

/// Verbs the cat does not understand.
const CAT_GREETINGS: &[&str] = &["greet", "wave", "bow"];

/// The one line shown for an interpreter outcome that is not an emote.
#[must_use]
pub fn feedback_line(err: &SoulError) -> String {
    match err {
        SoulError::UnknownVerb { verb, .. } if words::is_direction(verb) => {
            "You can't go in that direction.".to_string()
        }
        SoulError::NonSoulVerb(parsed) if parsed.qualifier.is_some() => {
            "That action doesn't support qualifiers.".to_string()
        }
        SoulError::NonSoulVerb(parsed) => format!("The verb '{}' is unrecognized.", parsed.verb),
        other => other.to_string(),
    }
}

/// Interprets one line from `actor`.
///
/// # Errors
///
/// Fails only on world inconsistencies, such as moving a living that is
/// not placed anywhere.
pub fn dispatch(
    game: &mut DemoGame,
    ctx: &mut TickContext<'_, DemoGame>,
    conn: ConnectionId,
    actor: EntityId,
    line: &str,
) -> Result<()> {
    match game.soul.parse(&game.world, actor, line, COMMANDS) {
        Ok(parsed) => {
            emote(game, ctx, actor, &parsed);
            Ok(())
        }
        Err(SoulError::NonSoulVerb(parsed)) if parsed.qualifier.is_none() => {
            for notice in &parsed.feedback {
                ctx.tell(actor, notice.as_str());
            }
            let exit = parsed
                .targets
                .first()
                .copied()
                .filter(|t| game.world.describe(*t).is_some_and(|d| d.kind == Kind::Exit));
            match exit {
                Some(exit) => go(game, ctx, actor, exit),
                None => {
                    command(game, ctx, conn, actor, &parsed);
                    Ok(())
                }
            }
        }
        Err(err) => {
            ctx.tell(actor, feedback_line(&err));
            Ok(())
        }
    }
}

fn emote(game: &mut DemoGame, ctx: &mut TickContext<'_, DemoGame>, actor: EntityId, parsed: &ParseResult) {
    let outcome = match game.soul.process_verb_parsed(&game.world, actor, parsed) {
        Ok(outcome) => outcome,
        Err(err) => {
            ctx.tell(actor, feedback_line(&err));
            return;
        }
    };
    for notice in &outcome.feedback {
        ctx.tell(actor, notice.as_str());
    }
    ctx.tell(actor, outcome.actor_message.as_str());
    for target in &outcome.targets {
        ctx.tell(*target, outcome.target_message.as_str());
    }
    for other in game.world.others_near(actor) {
        if !outcome.targets.contains(&other) {
            ctx.tell(other, outcome.room_message.as_str());
        }
    }

    let cat = game.landmarks.cat;
    if outcome.targets.contains(&cat) && parsed.qualifier.is_none() {
        let title = game.world.title(cat);
        if CAT_PLEASERS.contains(&parsed.verb.as_str()) {
            let text = format!("{title} curls up in a ball and purrs contently.");
            ctx.tell(actor, text.as_str());
            game.tell_others(ctx, actor, &text);
        } else if CAT_GREETINGS.contains(&parsed.verb.as_str()) {
            ctx.tell(actor, format!("{title} stares at you incomprehensibly."));
        }
    }
}

fn go(game: &mut DemoGame, ctx: &mut TickContext<'_, DemoGame>, actor: EntityId, exit: EntityId) -> Result<()> {
    let Some(to) = game.world.destination(exit) else {
        ctx.tell(actor, "You can't go there.");
        return Ok(());
    };
    let title = game.world.title(actor);
    game.tell_others(ctx, actor, &format!("{title} leaves."));
    game.world.move_living(actor, to)?;
    game.tell_others(ctx, actor, &format!("{title} arrives."));
    look(game, ctx, actor);
    Ok(())
}

fn look(game: &DemoGame, ctx: &mut TickContext<'_, DemoGame>, actor: EntityId) {
    for line in game.world.look(actor) {
        ctx.tell(actor, line);
    }
}

fn command(
    game: &mut DemoGame,
    ctx: &mut TickContext<'_, DemoGame>,
    conn: ConnectionId,
    actor: EntityId,
    parsed: &ParseResult,
) {
    match parsed.verb.as_str() {
        "look" | "l" => look(game, ctx, actor),
        "time" => {
            let now = ctx.clock().to_string();
            ctx.tell(actor, format!("It is now {now}."));
        }
        "wait" => wait(game, ctx, actor, parsed),
        "save" => ctx.request(Control::Save(conn)),
        "quit" => {
            ctx.tell(actor, "Goodbye.");
            ctx.request(Control::Disconnect(conn));
        }
        "help" => help(game, ctx, actor),
        "shutdown" => shutdown(game, ctx, actor),
        other => ctx.tell(actor, format!("The verb '{other}' is unrecognized.")),
    }
}

fn wait(game: &DemoGame, ctx: &mut TickContext<'_, DemoGame>, actor: EntityId, parsed: &ParseResult) {
    if game.mode == Mode::MultiActor {
        ctx.tell(actor, "Time waits for no one here.");
        return;
    }
    let minutes = match parsed.unparsed.split_whitespace().next() {
        None => DEFAULT_WAIT_MINUTES,
        Some(word) => match word.parse::<i64>() {
            Ok(n) if n >= 0 => n,
            _ => {
                ctx.tell(actor, "How long do you want to wait (in minutes)?");
                return;
            }
        },
    };
    let limit = ctx.max_wait();
    let Some(delta) = TimeDelta::try_minutes(minutes).filter(|d| *d <= limit) else {
        ctx.tell(
            actor,
            format!("You can't wait that long; {} hours at most.", limit.num_hours()),
        );
        return;
    };
    if !ctx.clock().is_frozen() && delta < ctx.tick_gametime() {
        ctx.tell(actor, "It's no use waiting such a short while.");
        return;
    }
    ctx.tell(actor, "Time passes.");
    ctx.request(Control::Wait(delta));
}

fn shutdown(game: &DemoGame, ctx: &mut TickContext<'_, DemoGame>, actor: EntityId) {
    let allowed = game
        .world
        .describe(actor)
        .is_some_and(|d| game.is_wizard(&d.name));
    if !allowed {
        ctx.tell(actor, "Only wizards may shut the game down.");
        return;
    }
    ctx.broadcast("The game is shutting down. Goodbye!");
    ctx.request(Control::Shutdown);
}

fn help(game: &DemoGame, ctx: &mut TickContext<'_, DemoGame>, actor: EntityId) {
    ctx.tell(actor, "Commands: look, wait [minutes], time, save, quit, help.");
    ctx.tell(
        actor,
        format!(
            "You also know {} social verbs, such as smile, hug, poke, and say.",
            game.soul.verbs().len()
        ),
    );
    ctx.tell(actor, "Walk through an exit by typing its name.");
}
