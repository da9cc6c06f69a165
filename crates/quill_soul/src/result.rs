//! The structured outcome of parsing one command line.

use std::collections::HashMap;
use std::fmt;

use quill_foundation::EntityId;

/// Where a target appeared in the command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhoInfo {
    /// Position of its first mention among the targets.
    pub sequence: usize,
    /// Filler word directly before the mention ("at", "and", ...).
    pub previous_word: Option<String>,
}

/// A parsed command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseResult {
    /// The verb, or the exit phrase for exit shortcuts.
    pub verb: String,
    /// Leading qualifier ("fail", "don't", "suddenly").
    pub qualifier: Option<String>,
    /// Adverb given by the player.
    pub adverb: Option<String>,
    /// Body part word given by the player ("nose").
    pub bodypart: Option<String>,
    /// Spoken or quoted message.
    pub message: Option<String>,
    /// Words from the verb onward, lowercased.
    pub words: Vec<String>,
    /// Arguments after the verb: names as matched, other words as typed.
    pub args: Vec<String>,
    /// Targets in mention order; duplicates kept.
    pub targets: Vec<EntityId>,
    /// Details of each distinct target's first mention.
    pub who_info: HashMap<EntityId, WhoInfo>,
    /// Text after the verb, as typed.
    pub unparsed: String,
    /// Words nothing claimed (only for verbs handled elsewhere).
    pub unrecognized: Vec<String>,
    /// Notices to show the player before the result ("By 'her'...").
    pub feedback: Vec<String>,
}

impl ParseResult {
    /// Creates a result for `verb` with nothing else parsed yet.
    #[must_use]
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            ..Self::default()
        }
    }

    /// The verb with its qualifier in front ("don't scream").
    #[must_use]
    pub fn full_verb(&self) -> String {
        match &self.qualifier {
            Some(q) => format!("{q} {}", self.verb),
            None => self.verb.clone(),
        }
    }

    /// Appends a target, recording its first mention.
    pub fn add_target(&mut self, id: EntityId, previous_word: Option<String>) {
        self.targets.push(id);
        let sequence = self.who_info.len();
        self.who_info.entry(id).or_insert(WhoInfo {
            sequence,
            previous_word,
        });
    }

    /// Removes every mention of a target.
    pub fn remove_target(&mut self, id: EntityId) {
        self.targets.retain(|t| *t != id);
        if self.who_info.remove(&id).is_some() {
            let order = self.targets.clone();
            let mut seen = Vec::new();
            for t in order {
                if !seen.contains(&t) {
                    seen.push(t);
                }
            }
            for (sequence, t) in seen.into_iter().enumerate() {
                if let Some(info) = self.who_info.get_mut(&t) {
                    info.sequence = sequence;
                }
            }
        }
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseResult(verb={}", self.verb)?;
        if let Some(q) = &self.qualifier {
            write!(f, ", qualifier={q}")?;
        }
        if let Some(a) = &self.adverb {
            write!(f, ", adverb={a}")?;
        }
        if let Some(b) = &self.bodypart {
            write!(f, ", bodypart={b}")?;
        }
        if let Some(m) = &self.message {
            write!(f, ", message={m:?}")?;
        }
        if !self.targets.is_empty() {
            let ids: Vec<String> = self.targets.iter().map(ToString::to_string).collect();
            write!(f, ", targets=[{}]", ids.join(", "))?;
        }
        if !self.unparsed.is_empty() {
            write!(f, ", unparsed={:?}", self.unparsed)?;
        }
        write!(f, ")")
    }
}
