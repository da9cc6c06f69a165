//! Verb definitions and the immutable verb table.
//!
//! A [`VerbTable`] is built once and shared by reference. Restricting or
//! extending it with [`VerbTable::adjust`] produces a new table; the
//! persistent map underneath shares every untouched entry.

use im::OrdMap;

/// Target cardinality and message shape of a verb.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Category {
    /// No target; optional separate wording for bystanders ("die").
    Bare,
    /// Works alone or at targets ("grin", "grin at max").
    Optional,
    /// Needs at least one target ("hug max").
    Physical,
    /// Different wording alone and with targets ("fear", "fear max").
    Personal,
    /// Moves the actor through an exit ("crawl east").
    Movement,
    /// Expects a spoken message ("say", "whisper").
    Speech,
}

/// How one verb is parsed and rendered.
///
/// Templates are written from the actor's point of view. `$word` marks the
/// verb that is conjugated for onlookers; `{how}`, `{who}`, `{where}`,
/// `{what}`, `{msg}`, `{question}`, `{your}`, `{poss}` and `{is}` are filled
/// in per perspective by [`crate::templates`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VerbDef {
    /// Shape of the verb.
    pub category: Category,
    /// Template without targets.
    pub alone: Option<&'static str>,
    /// Template with targets.
    pub targeted: Option<&'static str>,
    /// Bystander template without targets, when it differs from `alone`.
    pub others_alone: Option<&'static str>,
    /// Adverb used when none is given.
    pub adverb: Option<&'static str>,
    /// Message used when none is given.
    pub message: Option<&'static str>,
    /// Body part phrase used when none is given.
    pub bodypart: Option<&'static str>,
    /// Hostile towards its targets.
    pub aggressive: bool,
    /// May target items and exits, not only livings.
    pub nonliving_ok: bool,
}

impl VerbDef {
    const fn with(category: Category, alone: Option<&'static str>, targeted: Option<&'static str>) -> Self {
        Self {
            category,
            alone,
            targeted,
            others_alone: None,
            adverb: None,
            message: None,
            bodypart: None,
            aggressive: false,
            nonliving_ok: false,
        }
    }

    /// A verb with no target.
    #[must_use]
    pub const fn bare(alone: &'static str) -> Self {
        Self::with(Category::Bare, Some(alone), None)
    }

    /// A verb usable alone or at targets.
    #[must_use]
    pub const fn optional(alone: &'static str, targeted: &'static str) -> Self {
        Self::with(Category::Optional, Some(alone), Some(targeted))
    }

    /// A verb that needs a target.
    #[must_use]
    pub const fn physical(targeted: &'static str) -> Self {
        Self::with(Category::Physical, None, Some(targeted))
    }

    /// A verb whose wording changes entirely with a target.
    #[must_use]
    pub const fn personal(alone: &'static str, targeted: &'static str) -> Self {
        Self::with(Category::Personal, Some(alone), Some(targeted))
    }

    /// A speech verb; `alone` is `None` when a listener is required.
    #[must_use]
    pub const fn speech(alone: Option<&'static str>, targeted: &'static str) -> Self {
        Self::with(Category::Speech, alone, Some(targeted))
    }

    /// A movement verb, routed to exits rather than rendered.
    #[must_use]
    pub const fn movement() -> Self {
        Self::with(Category::Movement, None, None)
    }

    /// Sets the default adverb.
    #[must_use]
    pub const fn adverb(mut self, adverb: &'static str) -> Self {
        self.adverb = Some(adverb);
        self
    }

    /// Sets the default message.
    #[must_use]
    pub const fn message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    /// Sets the default body part phrase.
    #[must_use]
    pub const fn bodypart(mut self, phrase: &'static str) -> Self {
        self.bodypart = Some(phrase);
        self
    }

    /// Sets a bystander template for the untargeted form.
    #[must_use]
    pub const fn others(mut self, template: &'static str) -> Self {
        self.others_alone = Some(template);
        self
    }

    /// Marks the verb hostile.
    #[must_use]
    pub const fn aggressive(mut self) -> Self {
        self.aggressive = true;
        self
    }

    /// Allows non-living targets.
    #[must_use]
    pub const fn nonliving_ok(mut self) -> Self {
        self.nonliving_ok = true;
        self
    }

    /// True if the verb cannot be used without a target.
    #[must_use]
    pub const fn requires_target(&self) -> bool {
        self.alone.is_none() && !matches!(self.category, Category::Movement)
    }

    /// True for movement verbs.
    #[must_use]
    pub const fn is_movement(&self) -> bool {
        matches!(self.category, Category::Movement)
    }

    /// True for speech verbs.
    #[must_use]
    pub const fn is_speech(&self) -> bool {
        matches!(self.category, Category::Speech)
    }
}

/// The verbs the interpreter knows, keyed by verb word.
#[derive(Clone, Debug, Default)]
pub struct VerbTable {
    verbs: OrdMap<String, VerbDef>,
}

impl VerbTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from `(verb, definition)` pairs.
    #[must_use]
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, VerbDef)>) -> Self {
        Self {
            verbs: entries
                .into_iter()
                .map(|(verb, def)| (verb.to_string(), def))
                .collect(),
        }
    }

    /// Looks up a verb.
    #[must_use]
    pub fn get(&self, verb: &str) -> Option<&VerbDef> {
        self.verbs.get(verb)
    }

    /// True if the verb is known.
    #[must_use]
    pub fn contains(&self, verb: &str) -> bool {
        self.verbs.contains_key(verb)
    }

    /// Number of verbs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// True if there are no verbs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// All verb words, sorted.
    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.verbs.keys().map(String::as_str)
    }

    /// Verbs hostile towards their targets, sorted.
    #[must_use]
    pub fn aggressive(&self) -> Vec<&str> {
        self.select(|def| def.aggressive)
    }

    /// Verbs that accept non-living targets, sorted.
    #[must_use]
    pub fn nonliving_ok(&self) -> Vec<&str> {
        self.select(|def| def.nonliving_ok)
    }

    /// Movement verbs, sorted.
    #[must_use]
    pub fn movement(&self) -> Vec<&str> {
        self.select(VerbDef::is_movement)
    }

    fn select(&self, pred: impl Fn(&VerbDef) -> bool) -> Vec<&str> {
        self.verbs
            .iter()
            .filter(|(_, def)| pred(def))
            .map(|(verb, _)| verb.as_str())
            .collect()
    }

    /// Returns a new table restricted to `allowed` (all verbs if empty),
    /// without `remove`, plus `add`.
    #[must_use]
    pub fn adjust(&self, allowed: &[&str], remove: &[&str], add: &[(&str, VerbDef)]) -> Self {
        let mut verbs = if allowed.is_empty() {
            self.verbs.clone()
        } else {
            self.verbs
                .iter()
                .filter(|(verb, _)| allowed.contains(&verb.as_str()))
                .map(|(verb, def)| (verb.clone(), *def))
                .collect()
        };
        for verb in remove {
            verbs.remove(*verb);
        }
        for (verb, def) in add {
            verbs.insert((*verb).to_string(), *def);
        }
        Self { verbs }
    }
}
