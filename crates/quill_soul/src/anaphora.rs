//! Per-actor pronoun antecedents.
//!
//! Each actor's most recent completed parse leaves its targets here, and
//! "him", "her", "it" and "them" in that actor's next command refer back
//! to them. Actors never see each other's antecedents.

use std::collections::HashMap;

use quill_foundation::{EntityId, Gender, lang};

use crate::scope::Scope;

/// Pronouns successfully resolved, with a notice for the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    /// The referents.
    pub targets: Vec<EntityId>,
    /// "(By 'her', it is assumed you mean Kate.)"
    pub notice: String,
}

/// Antecedent memory, partitioned by actor.
#[derive(Clone, Debug, Default)]
pub struct AnaphoraMemory {
    last: HashMap<EntityId, Vec<EntityId>>,
}

impl AnaphoraMemory {
    /// Creates an empty memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the actor's antecedents with the targets of their latest parse.
    pub fn remember(&mut self, actor: EntityId, targets: &[EntityId]) {
        let mut kept: Vec<EntityId> = Vec::with_capacity(targets.len());
        for id in targets {
            if *id != actor && !kept.contains(id) {
                kept.push(*id);
            }
        }
        self.last.insert(actor, kept);
    }

    /// The actor's current antecedents.
    #[must_use]
    pub fn antecedents(&self, actor: EntityId) -> &[EntityId] {
        self.last.get(&actor).map(Vec::as_slice).unwrap_or_default()
    }

    /// Drops everything remembered for the actor.
    pub fn forget(&mut self, actor: EntityId) {
        self.last.remove(&actor);
    }

    /// Resolves a pronoun for the actor.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message when nothing fits or the referents
    /// are gone.
    pub fn resolve(&self, scope: &dyn Scope, actor: EntityId, pronoun: &str) -> Result<Resolved, String> {
        let previous = self.antecedents(actor);
        let candidates: Vec<EntityId> = match Gender::from_objective(pronoun) {
            Some(gender) => previous
                .iter()
                .copied()
                .filter(|id| scope.describe(*id).is_some_and(|d| d.gender == gender))
                .collect(),
            None => previous.to_vec(),
        };
        if candidates.is_empty() {
            return Err("It is not clear who you're referring to.".to_string());
        }
        if candidates.iter().any(|id| !scope.is_present(actor, *id)) {
            return Err(match Gender::from_objective(pronoun) {
                Some(gender) => format!("{} is no longer around.", lang::capital(gender.subjective())),
                None => "They are no longer around.".to_string(),
            });
        }

        let titles: Vec<&str> = candidates
            .iter()
            .filter_map(|id| scope.describe(*id).map(|d| d.title.as_str()))
            .collect();
        let notice = if pronoun == "them" {
            format!("(By 'them', it is assumed you mean: {}.)", lang::join(&titles, "and"))
        } else {
            format!("(By '{pronoun}', it is assumed you mean {}.)", lang::join(&titles, "and"))
        };
        Ok(Resolved {
            targets: candidates,
            notice,
        })
    }
}
