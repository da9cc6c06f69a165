//! Name matching against the actor's surroundings.
//!
//! Names may span several words ("brown bird", "door one"); the longest
//! name starting at a position wins over shorter ones.

use std::collections::HashMap;

use quill_foundation::EntityId;

use crate::scope::Scope;
use crate::tokenizer::InputToken;

/// A name found in the token stream.
#[derive(Clone, Debug, PartialEq)]
pub struct NameMatch {
    /// The object named.
    pub id: EntityId,
    /// How many tokens the name used.
    pub len: usize,
    /// The name as matched, lowercased.
    pub phrase: String,
}

/// Lookup table of every name an actor could mean.
#[derive(Clone, Debug, Default)]
pub struct NameIndex {
    by_phrase: HashMap<String, EntityId>,
    ordered: Vec<(String, EntityId)>,
    longest: usize,
}

impl NameIndex {
    /// Indexes the given objects in order; earlier objects win name clashes.
    pub fn build(scope: &dyn Scope, ids: impl IntoIterator<Item = EntityId>) -> Self {
        let mut index = Self::default();
        for id in ids {
            let Some(descriptor) = scope.describe(id) else {
                continue;
            };
            for name in descriptor.names() {
                index.longest = index.longest.max(name.split_whitespace().count());
                index.by_phrase.entry(name.clone()).or_insert(id);
                index.ordered.push((name, id));
            }
        }
        index
    }

    /// Everything an actor can point at: livings, items, exits.
    pub fn visible(scope: &dyn Scope, actor: EntityId) -> Self {
        let ids = scope
            .livings(actor)
            .into_iter()
            .chain(scope.items(actor))
            .chain(scope.exits(actor));
        Self::build(scope, ids)
    }

    /// Only the exits of the actor's location.
    pub fn exits(scope: &dyn Scope, actor: EntityId) -> Self {
        Self::build(scope, scope.exits(actor))
    }

    /// True if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// The longest name starting at `start`.
    ///
    /// A comma inside a candidate ends it; quoted tokens never match.
    #[must_use]
    pub fn longest_match(&self, tokens: &[InputToken], start: usize) -> Option<NameMatch> {
        let available = tokens.len().saturating_sub(start);
        for len in (1..=self.longest.min(available)).rev() {
            let window = &tokens[start..start + len];
            if window[..len - 1].iter().any(InputToken::has_comma) {
                continue;
            }
            let Some(words) = window.iter().map(InputToken::word).collect::<Option<Vec<_>>>() else {
                continue;
            };
            let phrase = words.join(" ");
            if let Some(&id) = self.by_phrase.get(&phrase) {
                return Some(NameMatch { id, len, phrase });
            }
        }
        None
    }

    /// Distinct objects having a name that starts with `prefix`.
    #[must_use]
    pub fn prefix_matches(&self, prefix: &str) -> Vec<EntityId> {
        let mut found = Vec::new();
        for (name, id) in &self.ordered {
            if name.starts_with(prefix) && !found.contains(id) {
                found.push(*id);
            }
        }
        found
    }
}
