//! Soul interpreter tests
//!
//! Parses and renders emotes against a `Locale` standing in for a room.

mod genders;
mod modifiers;
mod pronouns;
mod routing;
mod targets;
mod verbs;

use quill_foundation::{EntityId, Gender};
use quill_soul::{Descriptor, Locale};

pub const JULIE: EntityId = EntityId::new(1, 0);
pub const KATE: EntityId = EntityId::new(2, 0);
pub const MAX: EntityId = EntityId::new(3, 0);
pub const CAT: EntityId = EntityId::new(4, 0);
pub const OLD_MAN: EntityId = EntityId::new(5, 0);
pub const NEWSPAPER: EntityId = EntityId::new(6, 0);
pub const DOOR: EntityId = EntityId::new(7, 0);
pub const NORTH: EntityId = EntityId::new(8, 0);

/// Julie's living room: two friends, a cat, an old man, a paper, two exits.
pub fn room() -> Locale {
    Locale::new()
        .with(Descriptor::living(JULIE, "Julie", Gender::Female))
        .with(Descriptor::living(KATE, "Kate", Gender::Female))
        .with(Descriptor::living(MAX, "max", Gender::Male))
        .with(Descriptor::living(CAT, "garfield", Gender::Male).with_title("Garfield").with_alias("cat"))
        .with(Descriptor::living(OLD_MAN, "old man", Gender::Male))
        .with(Descriptor::item(NEWSPAPER, "newspaper").with_alias("paper"))
        .with(Descriptor::exit(DOOR, "garden door"))
        .with(Descriptor::exit(NORTH, "north").with_alias("n"))
}
