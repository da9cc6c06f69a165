//! Deferred actions of the demo world.

use std::time::Duration;

use quill_engine::{ActionRegistry, Deferred, TickContext};
use quill_foundation::{Result, Value};

use crate::game::DemoGame;

/// The cat purrs or yawns, then schedules its next turn.
pub const CAT_PURR: &str = "cat_purr";

/// Real seconds between the cat's turns, cycled.
const PURR_DELAYS: [u64; 5] = [5, 13, 8, 20, 11];

/// Every deferred action the demo schedules.
#[must_use]
pub fn registry() -> ActionRegistry<DemoGame> {
    ActionRegistry::new().with(CAT_PURR, cat_purr)
}

fn cat_purr(game: &mut DemoGame, ctx: &mut TickContext<'_, DemoGame>, entry: &Deferred) -> Result<()> {
    let turn = entry.args.first().and_then(Value::as_int).unwrap_or(0);
    let cat = entry.owner;
    let title = game.world.title(cat);
    let text = if turn % 2 == 0 {
        format!("{title} purrs happily.")
    } else {
        format!("{title} yawns sleepily.")
    };
    for living in game.world.others_near(cat) {
        ctx.tell(living, text.as_str());
    }

    let slot = usize::try_from(turn.rem_euclid(5)).unwrap_or(0);
    ctx.defer_in(
        Duration::from_secs(PURR_DELAYS[slot]),
        cat,
        CAT_PURR,
        vec![Value::Int(turn + 1)],
    );
    Ok(())
}
