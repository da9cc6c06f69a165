//! The interpreter facade.
//!
//! [`Soul::parse`] classifies and resolves a command line, and
//! [`Soul::process_verb_parsed`] renders the result into perspective
//! messages. The soul keeps one piece of state: each actor's antecedents for
//! pronouns, kept apart per actor.

use std::collections::HashSet;

use quill_foundation::{EntityId, lang};
use tracing::debug;

use crate::adverbs;
use crate::anaphora::AnaphoraMemory;
use crate::emotes;
use crate::error::SoulError;
use crate::result::ParseResult;
use crate::scope::{Descriptor, Scope};
use crate::targets::{NameIndex, NameMatch};
use crate::templates::{self, Perspective, Scene};
use crate::tokenizer::{InputToken, InputTokenizer};
use crate::verbs::{VerbDef, VerbTable};
use crate::words;

/// A rendered emote.
#[derive(Clone, Debug, PartialEq)]
pub struct VerbOutcome {
    /// The verb with its qualifier ("don't scream").
    pub verb: String,
    /// Who the emote was aimed at, the actor excluded.
    pub targets: HashSet<EntityId>,
    /// What the actor reads.
    pub actor_message: String,
    /// What bystanders read.
    pub room_message: String,
    /// What the targets read.
    pub target_message: String,
    /// Notices to show the actor first.
    pub feedback: Vec<String>,
}

/// The free-text emote interpreter.
#[derive(Clone, Debug)]
pub struct Soul {
    verbs: VerbTable,
    memory: AnaphoraMemory,
}

impl Default for Soul {
    fn default() -> Self {
        Self::new()
    }
}

impl Soul {
    /// Creates a soul with the built-in verbs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_verbs(emotes::standard())
    }

    /// Creates a soul with a custom verb table.
    #[must_use]
    pub fn with_verbs(verbs: VerbTable) -> Self {
        Self {
            verbs,
            memory: AnaphoraMemory::new(),
        }
    }

    /// The verb table in use.
    #[must_use]
    pub fn verbs(&self) -> &VerbTable {
        &self.verbs
    }

    /// Swaps in another verb table, e.g. one made by [`VerbTable::adjust`].
    pub fn set_verbs(&mut self, verbs: VerbTable) {
        self.verbs = verbs;
    }

    /// Pronoun antecedents per actor.
    #[must_use]
    pub fn memory(&self) -> &AnaphoraMemory {
        &self.memory
    }

    /// Drops the actor's antecedents, e.g. on logout.
    pub fn forget(&mut self, actor: EntityId) {
        self.memory.forget(actor);
    }

    /// Parses a command line for `actor`.
    ///
    /// `external` lists verbs the caller handles itself; they are parsed the
    /// same way but come back as [`SoulError::NonSoulVerb`].
    ///
    /// # Errors
    ///
    /// - [`SoulError::UnknownVerb`] when no verb is recognized
    /// - [`SoulError::ParseError`] for malformed or ambiguous arguments
    /// - [`SoulError::NonSoulVerb`] for external verbs and exit shortcuts
    pub fn parse(
        &mut self,
        scope: &dyn Scope,
        actor: EntityId,
        text: &str,
        external: &[&str],
    ) -> Result<ParseResult, SoulError> {
        let result = Parser::new(self, scope, actor, text).run(external);
        match &result {
            Ok(parsed) => self.memory.remember(actor, &parsed.targets),
            Err(SoulError::NonSoulVerb(parsed)) => self.memory.remember(actor, &parsed.targets),
            Err(_) => {}
        }
        if let Ok(parsed) = &result {
            debug!(%actor, verb = %parsed.verb, targets = parsed.targets.len(), "parsed emote");
        }
        result
    }

    /// Renders a parsed soul verb into its three perspective messages.
    ///
    /// # Errors
    ///
    /// [`SoulError::ParseError`] when the verb cannot apply to its targets,
    /// [`SoulError::UnknownVerb`] when the verb is not a soul verb, and
    /// [`SoulError::NonSoulVerb`] for movement verbs.
    pub fn process_verb_parsed(
        &self,
        scope: &dyn Scope,
        actor: EntityId,
        parsed: &ParseResult,
    ) -> Result<VerbOutcome, SoulError> {
        let def = self.verbs.get(&parsed.verb).copied().ok_or_else(|| SoulError::UnknownVerb {
            verb: parsed.verb.clone(),
            words: parsed.words.clone(),
            qualifier: parsed.qualifier.clone(),
        })?;
        if def.is_movement() {
            return Err(SoulError::NonSoulVerb(Box::new(parsed.clone())));
        }
        let actor_desc = scope
            .describe(actor)
            .ok_or_else(|| SoulError::parse("You can't do that right now."))?;

        let mut targets: Vec<&Descriptor> = Vec::new();
        for id in &parsed.targets {
            if let Some(desc) = scope.describe(*id) {
                if !targets.iter().any(|t| t.id == desc.id) {
                    targets.push(desc);
                }
            }
        }
        if !def.nonliving_ok && targets.iter().any(|t| !t.is_living()) {
            return Err(SoulError::parse(format!("You can't {} that.", parsed.verb)));
        }

        let (template, others) = match (def.targeted, def.alone) {
            (Some(targeted), _) if !targets.is_empty() => (targeted, targeted),
            (_, Some(alone)) => {
                targets.clear();
                (alone, def.others_alone.unwrap_or(alone))
            }
            _ => return Err(SoulError::parse(format!("The verb {} needs a person.", parsed.verb))),
        };

        let qualifier = parsed.qualifier.as_deref();
        let default_adverb = if qualifier == Some("fail") { None } else { def.adverb };
        let scene = Scene {
            actor: actor_desc,
            targets,
            qualifier,
            adverb: parsed.adverb.as_deref().or(default_adverb),
            bodypart: parsed.bodypart.as_deref().and_then(words::body_part).or(def.bodypart),
            what: parsed
                .message
                .as_ref()
                .map(|m| format!("'{m}'"))
                .or_else(|| def.message.map(str::to_string)),
            msg: parsed.message.as_deref().or(def.message),
        };

        let outcome = VerbOutcome {
            verb: parsed.full_verb(),
            targets: scene
                .targets
                .iter()
                .map(|t| t.id)
                .filter(|id| *id != actor)
                .collect(),
            actor_message: templates::sentence(template, &scene, Perspective::Actor),
            room_message: templates::sentence(others, &scene, Perspective::Room),
            target_message: templates::sentence(others, &scene, Perspective::Target),
            feedback: parsed.feedback.clone(),
        };
        Ok(outcome)
    }

    /// Parses and renders in one step.
    ///
    /// # Errors
    ///
    /// Anything [`Soul::parse`] or [`Soul::process_verb_parsed`] returns.
    pub fn process_verb(
        &mut self,
        scope: &dyn Scope,
        actor: EntityId,
        text: &str,
        external: &[&str],
    ) -> Result<VerbOutcome, SoulError> {
        let parsed = self.parse(scope, actor, text, external)?;
        self.process_verb_parsed(scope, actor, &parsed)
    }
}

// ============================================================================
// Parsing
// ============================================================================

struct Parser<'a> {
    soul: &'a Soul,
    scope: &'a dyn Scope,
    actor: EntityId,
    text: &'a str,
    tokens: Vec<InputToken>,
    exits: NameIndex,
}

impl<'a> Parser<'a> {
    fn new(soul: &'a Soul, scope: &'a dyn Scope, actor: EntityId, text: &'a str) -> Self {
        Self {
            soul,
            scope,
            actor,
            text,
            tokens: InputTokenizer::tokenize(text),
            exits: NameIndex::exits(scope, actor),
        }
    }

    fn run(self, external: &[&str]) -> Result<ParseResult, SoulError> {
        let qualifier = self
            .tokens
            .first()
            .and_then(InputToken::word)
            .and_then(words::qualifier)
            .map(str::to_string);
        let mut pos = usize::from(qualifier.is_some());
        pos = self.skip_ignored(pos);

        let Some(token) = self.tokens.get(pos) else {
            return Err(SoulError::parse("What?"));
        };
        if let Some(exit) = self.exits.longest_match(&self.tokens, pos) {
            let rest = pos + exit.len;
            let mut parsed = self.base(exit.phrase.clone(), qualifier, pos, rest);
            return Err(self.route_to_exit(&mut parsed, exit, rest));
        }

        let verb = token.word().unwrap_or_else(|| token.raw()).to_string();
        let is_external = external.contains(&verb.as_str());
        let def = if is_external { None } else { self.soul.verbs.get(&verb).copied() };
        if !is_external && def.is_none() {
            return Err(SoulError::UnknownVerb {
                words: self.words_from(pos),
                verb,
                qualifier,
            });
        }

        let mut parsed = self.base(verb.clone(), qualifier, pos, pos + 1);
        if let Some(def) = def {
            if def.is_movement() {
                return Err(self.movement(parsed, pos + 1));
            }
        }
        self.arguments(&mut parsed, def, pos + 1)?;

        match def {
            Some(def) if def.requires_target() && parsed.targets.is_empty() => {
                Err(SoulError::parse(format!("The verb {verb} needs a person.")))
            }
            None => Err(SoulError::NonSoulVerb(Box::new(parsed))),
            Some(_) => Ok(parsed),
        }
    }

    /// Skips filler words, stopping where an exit name begins.
    fn skip_ignored(&self, mut pos: usize) -> usize {
        while let Some(word) = self.tokens.get(pos).and_then(InputToken::word) {
            if !words::is_ignored(word) || self.exits.longest_match(&self.tokens, pos).is_some() {
                break;
            }
            pos += 1;
        }
        pos
    }

    fn words_from(&self, pos: usize) -> Vec<String> {
        self.tokens[pos..]
            .iter()
            .map(|t| t.word().map_or_else(|| t.raw().to_lowercase(), str::to_string))
            .collect()
    }

    /// A result for `verb` at `pos`, whose text ends before token `rest`.
    fn base(&self, verb: String, qualifier: Option<String>, pos: usize, rest: usize) -> ParseResult {
        let mut parsed = ParseResult::new(verb);
        parsed.qualifier = qualifier;
        parsed.words = self.words_from(pos);
        let cut = self.tokens[rest - 1].end();
        parsed.unparsed = self.text[cut..].trim().to_string();
        parsed
    }

    fn route_to_exit(&self, parsed: &mut ParseResult, exit: NameMatch, rest: usize) -> SoulError {
        parsed.add_target(exit.id, None);
        parsed
            .args
            .extend(self.tokens[rest..].iter().map(|t| t.raw().to_string()));
        SoulError::NonSoulVerb(Box::new(std::mem::take(parsed)))
    }

    fn movement(&self, mut parsed: ParseResult, pos: usize) -> SoulError {
        let at = self.skip_ignored(pos);
        if let Some(exit) = self.exits.longest_match(&self.tokens, at) {
            let rest = at + exit.len;
            parsed.verb.clone_from(&exit.phrase);
            return self.route_to_exit(&mut parsed, exit, rest);
        }
        if at < self.tokens.len() {
            SoulError::parse(format!("You can't {} there.", parsed.verb))
        } else if !self.exits.is_empty() {
            SoulError::parse(format!("{} where?", lang::capital(&parsed.verb)))
        } else {
            SoulError::UnknownVerb {
                verb: parsed.verb,
                words: parsed.words,
                qualifier: parsed.qualifier,
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn arguments(&self, parsed: &mut ParseResult, def: Option<VerbDef>, start: usize) -> Result<(), SoulError> {
        let names = NameIndex::visible(self.scope, self.actor);
        let soul_verb = def.is_some();
        let speech = def.is_some_and(|d| d.is_speech());
        let mut previous: Option<String> = None;
        let mut saw_everyone = false;
        let mut excluding = false;
        let mut in_message = false;
        let mut spoken: Vec<String> = Vec::new();

        let mut i = start;
        while i < self.tokens.len() {
            let token = &self.tokens[i];
            let raw = token.raw().to_string();
            let Some(word) = token.word() else {
                if parsed.message.is_none() {
                    parsed.message = Some(raw.clone());
                }
                parsed.args.push(raw);
                i += 1;
                continue;
            };

            if in_message {
                if words::MESSAGE_END_WORDS.contains(&word) {
                    in_message = false;
                    previous = Some(word.to_string());
                } else {
                    spoken.push(raw.clone());
                    parsed.args.push(raw);
                }
                i += 1;
                continue;
            }

            if let Some(found) = names.longest_match(&self.tokens, i) {
                mark(parsed, found.id, previous.take(), excluding);
                parsed.args.push(found.phrase);
                i += found.len;
                continue;
            }
            i += 1;

            if words::is_ignored(word) {
                previous = Some(word.to_string());
                continue;
            }
            let prev = previous.take();

            if words::SELF_WORDS.contains(&word) {
                mark(parsed, self.actor, prev, excluding);
                parsed.args.push(word.to_string());
                continue;
            }
            if words::EVERYONE_WORDS.contains(&word) {
                saw_everyone = true;
                for id in self.scope.livings(self.actor) {
                    if id != self.actor {
                        mark(parsed, id, prev.clone(), excluding);
                    }
                }
                parsed.args.push(word.to_string());
                continue;
            }
            if saw_everyone && words::EXCEPT_WORDS.contains(&word) {
                excluding = true;
                continue;
            }
            if words::PRONOUNS.contains(&word) {
                let resolved = self
                    .soul
                    .memory
                    .resolve(self.scope, self.actor, word)
                    .map_err(SoulError::ParseError)?;
                for id in resolved.targets {
                    mark(parsed, id, prev.clone(), excluding);
                }
                parsed.feedback.push(resolved.notice);
                parsed.args.push(word.to_string());
                continue;
            }
            if let Some(phrase) = words::body_part(word) {
                if let Some(existing) = parsed.bodypart.as_deref().and_then(words::body_part) {
                    return Err(SoulError::parse(format!(
                        "You can't do that both {existing} and {phrase}."
                    )));
                }
                parsed.bodypart = Some(word.to_string());
                continue;
            }
            if adverbs::is_adverb(word) {
                set_adverb(parsed, word)?;
                continue;
            }
            if soul_verb && !speech {
                let candidates = adverbs::by_prefix(word);
                match candidates.as_slice() {
                    [] => {}
                    [only] => {
                        set_adverb(parsed, only)?;
                        continue;
                    }
                    several => {
                        return Err(SoulError::parse(format!(
                            "What adverb did you mean: {}?",
                            lang::join(several, "or")
                        )));
                    }
                }
                if let [only] = names.prefix_matches(word).as_slice() {
                    if let Some(desc) = self.scope.describe(*only) {
                        return Err(SoulError::parse(format!("Perhaps you meant {}?", desc.name)));
                    }
                }
            }
            if speech {
                in_message = true;
                spoken.push(raw.clone());
                parsed.args.push(raw);
                continue;
            }

            parsed.unrecognized.push(raw.clone());
            parsed.args.push(raw);
            if soul_verb {
                return Err(SoulError::parse(format!(
                    "It's not clear what you mean by '{word}'."
                )));
            }
        }

        if parsed.message.is_none() && !spoken.is_empty() {
            parsed.message = Some(spoken.join(" "));
        }
        Ok(())
    }
}

fn mark(parsed: &mut ParseResult, id: EntityId, previous: Option<String>, excluding: bool) {
    if excluding {
        parsed.remove_target(id);
    } else {
        parsed.add_target(id, previous);
    }
}

fn set_adverb(parsed: &mut ParseResult, adverb: &str) -> Result<(), SoulError> {
    match &parsed.adverb {
        Some(existing) if existing != adverb => Err(SoulError::parse(format!(
            "You can't do that both {existing} and {adverb}."
        ))),
        _ => {
            parsed.adverb = Some(adverb.to_string());
            Ok(())
        }
    }
}
