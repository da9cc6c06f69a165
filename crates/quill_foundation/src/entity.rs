//! Entity identifiers with generational indices.
//!
//! Everything the interpreter and scheduler talk about (players, NPCs,
//! items, exits) is referred to by an [`EntityId`]. The scheduler only ever
//! holds ids, never the entities themselves, so a destroyed owner can be
//! detected by a failed lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a world object.
///
/// The generation increments when a slot is reused, so an id captured
/// before the original object was destroyed no longer matches.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    /// Slot index.
    pub index: u64,
    /// Generation of the slot.
    pub generation: u32,
}

impl EntityId {
    /// Creates an id from a slot index and generation.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The "nobody" id, used as owner of system-level deferreds.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            index: u64::MAX,
            generation: 0,
        }
    }

    /// Returns true for [`EntityId::null`].
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index == u64::MAX
    }

    /// Returns the id that replaces this one when its slot is reused.
    #[must_use]
    pub const fn next_generation(self) -> Self {
        Self {
            index: self.index,
            generation: self.generation.wrapping_add(1),
        }
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "EntityId(null)")
        } else {
            write!(f, "EntityId({}v{})", self.index, self.generation)
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "#null")
        } else {
            write!(f, "#{}", self.index)
        }
    }
}
