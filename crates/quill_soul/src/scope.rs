//! What an actor can see.
//!
//! The interpreter does not own the world. Whoever embeds it implements
//! [`Scope`] to describe the actor's surroundings: livings and items in the
//! same location (plus inventory) and the location's exits.

use std::collections::HashMap;

use quill_foundation::{EntityId, Gender};

/// Broad class of a world object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Players and NPCs.
    Living,
    /// Carriable things.
    Item,
    /// Ways out of a location.
    Exit,
}

/// The naming facts about a world object.
#[derive(Clone, Debug, PartialEq)]
pub struct Descriptor {
    /// The object's id.
    pub id: EntityId,
    /// Its class.
    pub kind: Kind,
    /// Short lowercase name used for matching ("brown bird").
    pub name: String,
    /// How it is referred to in messages ("Kate", "the great Julie").
    pub title: String,
    /// Grammatical gender.
    pub gender: Gender,
    /// Extra names that also match.
    pub aliases: Vec<String>,
}

impl Descriptor {
    fn new(id: EntityId, kind: Kind, name: &str, gender: Gender) -> Self {
        Self {
            id,
            kind,
            name: name.to_lowercase(),
            title: name.to_string(),
            gender,
            aliases: Vec::new(),
        }
    }

    /// Describes a living.
    #[must_use]
    pub fn living(id: EntityId, name: &str, gender: Gender) -> Self {
        Self::new(id, Kind::Living, name, gender)
    }

    /// Describes an item.
    #[must_use]
    pub fn item(id: EntityId, name: &str) -> Self {
        Self::new(id, Kind::Item, name, Gender::Neuter)
    }

    /// Describes an exit.
    #[must_use]
    pub fn exit(id: EntityId, name: &str) -> Self {
        Self::new(id, Kind::Exit, name, Gender::Neuter)
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_lowercase());
        self
    }

    /// Name, title and aliases, lowercased and deduplicated.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names = vec![self.name.clone()];
        for extra in std::iter::once(self.title.to_lowercase()).chain(self.aliases.iter().cloned()) {
            if !names.contains(&extra) {
                names.push(extra);
            }
        }
        names
    }

    /// True for livings.
    #[must_use]
    pub fn is_living(&self) -> bool {
        self.kind == Kind::Living
    }
}

/// The world as seen by the interpreter.
pub trait Scope {
    /// Naming facts for an object, if it still exists.
    fn describe(&self, id: EntityId) -> Option<&Descriptor>;

    /// Livings in the actor's location, the actor included, in location order.
    fn livings(&self, actor: EntityId) -> Vec<EntityId>;

    /// Items in the actor's location and inventory.
    fn items(&self, actor: EntityId) -> Vec<EntityId>;

    /// Exits of the actor's location.
    fn exits(&self, actor: EntityId) -> Vec<EntityId>;

    /// True if `id` is a living or item the actor can currently see.
    fn is_present(&self, actor: EntityId, id: EntityId) -> bool {
        id == actor || self.livings(actor).contains(&id) || self.items(actor).contains(&id)
    }
}

/// A single location's contents, for small embeddings and tests.
///
/// Every actor asking is assumed to stand in this one place.
#[derive(Clone, Debug, Default)]
pub struct Locale {
    descriptors: HashMap<EntityId, Descriptor>,
    livings: Vec<EntityId>,
    items: Vec<EntityId>,
    exits: Vec<EntityId>,
}

impl Locale {
    /// Creates an empty locale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object; its kind decides where it is listed.
    pub fn add(&mut self, descriptor: Descriptor) -> EntityId {
        let id = descriptor.id;
        match descriptor.kind {
            Kind::Living => self.livings.push(id),
            Kind::Item => self.items.push(id),
            Kind::Exit => self.exits.push(id),
        }
        self.descriptors.insert(id, descriptor);
        id
    }

    /// Builder form of [`Locale::add`].
    #[must_use]
    pub fn with(mut self, descriptor: Descriptor) -> Self {
        self.add(descriptor);
        self
    }

    /// Removes an object from the locale, leaving its description known.
    pub fn remove(&mut self, id: EntityId) {
        self.livings.retain(|l| *l != id);
        self.items.retain(|i| *i != id);
        self.exits.retain(|e| *e != id);
    }
}

impl Scope for Locale {
    fn describe(&self, id: EntityId) -> Option<&Descriptor> {
        self.descriptors.get(&id)
    }

    fn livings(&self, _actor: EntityId) -> Vec<EntityId> {
        self.livings.clone()
    }

    fn items(&self, _actor: EntityId) -> Vec<EntityId> {
        self.items.clone()
    }

    fn exits(&self, _actor: EntityId) -> Vec<EntityId> {
        self.exits.clone()
    }
}
