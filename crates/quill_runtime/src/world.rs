//! The demo world: a few rooms, their exits, and who is where.
//!
//! The world answers the interpreter's [`Scope`] questions from the point of
//! view of whichever living is asking.

use std::collections::{BTreeMap, HashMap};

use quill_foundation::{EntityId, Error, Gender, Result, lang};
use quill_soul::{Descriptor, Kind, Scope};

/// A location.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    /// Room id.
    pub id: EntityId,
    /// Short name shown as a heading.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Exits leading out, in display order.
    pub exits: Vec<EntityId>,
    /// Livings present, in arrival order.
    pub livings: Vec<EntityId>,
    /// Items lying here.
    pub items: Vec<EntityId>,
}

#[derive(Clone, Debug, PartialEq)]
struct Passage {
    to: EntityId,
    description: String,
}

/// Notable objects of the demo house.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landmarks {
    /// Where players start.
    pub living_room: EntityId,
    /// Small side room.
    pub closet: EntityId,
    /// Behind the garden door.
    pub garden: EntityId,
    /// Garfield the cat.
    pub cat: EntityId,
    /// Grandfather clock, chimes on the hour.
    pub clock: EntityId,
}

/// Rooms, exits, livings, and items.
#[derive(Clone, Debug, Default)]
pub struct World {
    descriptors: HashMap<EntityId, Descriptor>,
    rooms: BTreeMap<EntityId, Room>,
    passages: HashMap<EntityId, Passage>,
    location: HashMap<EntityId, EntityId>,
    next_index: u64,
    // Slots of removed objects, already bumped to their next generation.
    free: Vec<EntityId>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the demo house.
    #[must_use]
    pub fn house() -> (Self, Landmarks) {
        let mut world = Self::new();
        let living_room = world.add_room(
            "Living room",
            "The living room of your house on the edge of town. A grandfather clock ticks in the corner.",
        );
        let closet = world.add_room("Closet", "A cramped closet that smells of mothballs.");
        let garden = world.add_room("Garden", "An overgrown garden behind the house.");

        world.add_exit(living_room, &["closet"], closet, "A narrow door opens into a closet.");
        world.add_exit(closet, &["living room", "out"], living_room, "The living room is back the way you came.");
        world.add_exit(living_room, &["garden", "door"], garden, "A heavy door leads out to the garden.");
        world.add_exit(garden, &["house", "inside"], living_room, "The back door leads into the house.");
        world.add_exit(garden, &["north", "n"], living_room, "The house lies to the north.");

        world.add_item(closet, "key", "small rusty key");
        let clock = world.add_item(living_room, "clock", "grandfather clock");
        let cat = world.add_living(living_room, "garfield", Gender::Male, &["cat"]);

        let landmarks = Landmarks {
            living_room,
            closet,
            garden,
            cat,
            clock,
        };
        (world, landmarks)
    }

    fn allocate(&mut self) -> EntityId {
        if let Some(id) = self.free.pop() {
            return id;
        }
        self.next_index += 1;
        EntityId::new(self.next_index, 0)
    }

    // -------------------------------------------------------------------------
    // Building
    // -------------------------------------------------------------------------

    /// Adds an empty room.
    pub fn add_room(&mut self, name: &str, description: &str) -> EntityId {
        let id = self.allocate();
        self.rooms.insert(
            id,
            Room {
                id,
                name: name.to_string(),
                description: description.to_string(),
                exits: Vec::new(),
                livings: Vec::new(),
                items: Vec::new(),
            },
        );
        id
    }

    /// Adds an exit from `from` to `to`. The first name is the main one, the
    /// rest are aliases.
    ///
    /// # Panics
    ///
    /// Panics if `names` is empty.
    pub fn add_exit(&mut self, from: EntityId, names: &[&str], to: EntityId, description: &str) -> EntityId {
        let id = self.allocate();
        let mut descriptor = Descriptor::exit(id, names[0]);
        for alias in &names[1..] {
            descriptor = descriptor.with_alias(alias);
        }
        self.descriptors.insert(id, descriptor);
        self.passages.insert(
            id,
            Passage {
                to,
                description: description.to_string(),
            },
        );
        if let Some(room) = self.rooms.get_mut(&from) {
            room.exits.push(id);
        }
        id
    }

    /// Adds an item to a room.
    pub fn add_item(&mut self, room: EntityId, name: &str, title: &str) -> EntityId {
        let id = self.allocate();
        self.descriptors
            .insert(id, Descriptor::item(id, name).with_title(title));
        self.place(id, room, Kind::Item);
        id
    }

    /// Adds a living to a room. Its title is the capitalized name.
    pub fn add_living(&mut self, room: EntityId, name: &str, gender: Gender, aliases: &[&str]) -> EntityId {
        let id = self.allocate();
        let mut descriptor = Descriptor::living(id, name, gender).with_title(lang::capital(name));
        for alias in aliases {
            descriptor = descriptor.with_alias(alias);
        }
        self.descriptors.insert(id, descriptor);
        self.place(id, room, Kind::Living);
        id
    }

    fn place(&mut self, id: EntityId, room: EntityId, kind: Kind) {
        if let Some(r) = self.rooms.get_mut(&room) {
            match kind {
                Kind::Living => r.livings.push(id),
                Kind::Item => r.items.push(id),
                Kind::Exit => r.exits.push(id),
            }
            self.location.insert(id, room);
        }
    }

    fn unplace(&mut self, id: EntityId) -> Option<EntityId> {
        let room = self.location.remove(&id)?;
        if let Some(r) = self.rooms.get_mut(&room) {
            r.livings.retain(|l| *l != id);
            r.items.retain(|i| *i != id);
        }
        Some(room)
    }

    /// Removes a living or item entirely. Its slot is reused later under a
    /// new generation, so the old id never matches again.
    pub fn remove(&mut self, id: EntityId) -> Option<Descriptor> {
        self.unplace(id);
        let removed = self.descriptors.remove(&id)?;
        self.free.push(id.next_generation());
        Some(removed)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// True if the object still exists.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.descriptors.contains_key(&id) || self.rooms.contains_key(&id)
    }

    /// Room holding `id`.
    #[must_use]
    pub fn location_of(&self, id: EntityId) -> Option<EntityId> {
        self.location.get(&id).copied()
    }

    /// A room.
    #[must_use]
    pub fn room(&self, id: EntityId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Where an exit leads.
    #[must_use]
    pub fn destination(&self, exit: EntityId) -> Option<EntityId> {
        self.passages.get(&exit).map(|p| p.to)
    }

    /// The title used in messages, or "someone" for unknown ids.
    #[must_use]
    pub fn title(&self, id: EntityId) -> String {
        self.descriptors
            .get(&id)
            .map_or_else(|| "someone".to_string(), |d| d.title.clone())
    }

    /// A living anywhere in the world with this name.
    #[must_use]
    pub fn find_living(&self, name: &str) -> Option<EntityId> {
        let name = name.to_lowercase();
        self.descriptors
            .values()
            .find(|d| d.is_living() && d.name == name)
            .map(|d| d.id)
    }

    /// Livings sharing a room with `id`, excluding `id`.
    #[must_use]
    pub fn others_near(&self, id: EntityId) -> Vec<EntityId> {
        self.location_of(id)
            .and_then(|room| self.rooms.get(&room))
            .map(|room| room.livings.iter().copied().filter(|l| *l != id).collect())
            .unwrap_or_default()
    }

    /// Livings in a room.
    #[must_use]
    pub fn livings_in(&self, room: EntityId) -> Vec<EntityId> {
        self.rooms.get(&room).map(|r| r.livings.clone()).unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Movement
    // -------------------------------------------------------------------------

    /// Moves a living into `to`. Returns the room it left.
    ///
    /// # Errors
    ///
    /// Fails if either the living or the room does not exist.
    pub fn move_living(&mut self, id: EntityId, to: EntityId) -> Result<EntityId> {
        if !self.rooms.contains_key(&to) {
            return Err(Error::entity_not_found(to));
        }
        let from = self.unplace(id).ok_or_else(|| Error::entity_not_found(id))?;
        self.place(id, to, Kind::Living);
        Ok(from)
    }

    /// What `viewer` sees when looking around.
    #[must_use]
    pub fn look(&self, viewer: EntityId) -> Vec<String> {
        let Some(room) = self.location_of(viewer).and_then(|r| self.rooms.get(&r)) else {
            return vec!["You see nothing.".to_string()];
        };
        let mut lines = vec![format!("[{}]", room.name), room.description.clone()];
        for exit in &room.exits {
            if let Some(passage) = self.passages.get(exit) {
                lines.push(passage.description.clone());
            }
        }
        let items: Vec<String> = room
            .items
            .iter()
            .filter_map(|i| self.descriptors.get(i))
            .map(|d| lang::a(&d.title))
            .collect();
        if !items.is_empty() {
            lines.push(format!("You see {}.", lang::join(&items, "and")));
        }
        let present: Vec<String> = room
            .livings
            .iter()
            .filter(|l| **l != viewer)
            .map(|l| self.title(*l))
            .collect();
        match present.len() {
            0 => {}
            1 => lines.push(format!("{} is here.", present[0])),
            _ => lines.push(format!("{} are here.", lang::join(&present, "and"))),
        }
        lines
    }
}

impl Scope for World {
    fn describe(&self, id: EntityId) -> Option<&Descriptor> {
        self.descriptors.get(&id)
    }

    fn livings(&self, actor: EntityId) -> Vec<EntityId> {
        self.location_of(actor)
            .map(|room| self.livings_in(room))
            .unwrap_or_default()
    }

    fn items(&self, actor: EntityId) -> Vec<EntityId> {
        self.location_of(actor)
            .and_then(|room| self.rooms.get(&room))
            .map(|r| r.items.clone())
            .unwrap_or_default()
    }

    fn exits(&self, actor: EntityId) -> Vec<EntityId> {
        self.location_of(actor)
            .and_then(|room| self.rooms.get(&room))
            .map(|r| r.exits.clone())
            .unwrap_or_default()
    }
}
