//! Free-text emote interpreter ("soul") for multi-user text adventures.
//!
//! The soul turns lines such as `fail grin sickly at everyone` into a
//! [`ParseResult`] and then into three perspective messages: one for the
//! actor, one for bystanders, one for the targets.
//!
//! # Architecture
//!
//! ```text
//! "suddenly tickle kate and max"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → [suddenly, tickle, kate, and, max]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ WORD            │  → qualifier "suddenly", verb "tickle",
//! │ CLASSIFIER      │    adverbs, body parts, ignore words
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ TARGET          │  → [kate, max] (names, aliases, "all", pronouns)
//! │ RESOLVER        │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ VERB TEMPLATE   │  → "You suddenly tickle Kate and Max."
//! │ ENGINE          │    "Julie suddenly tickles you."
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`] - Whitespace tokens, quoted messages, source offsets
//! - [`words`] - Qualifiers, ignore words, body parts, pronouns, directions
//! - [`adverbs`] - The adverb list and prefix lookup
//! - [`verbs`] - Verb definitions and the immutable verb table
//! - [`emotes`] - The built-in social verbs
//! - [`scope`] - What the actor can see, supplied by the world
//! - [`targets`] - Name matching against the actor's surroundings
//! - [`anaphora`] - Per-actor pronoun antecedents
//! - [`templates`] - Perspective message rendering
//! - [`soul`] - The facade tying it together

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod adverbs;
pub mod anaphora;
pub mod emotes;
pub mod error;
pub mod result;
pub mod scope;
pub mod soul;
pub mod targets;
pub mod templates;
pub mod tokenizer;
pub mod verbs;
pub mod words;

pub use error::SoulError;
pub use result::{ParseResult, WhoInfo};
pub use scope::{Descriptor, Kind, Locale, Scope};
pub use soul::{Soul, VerbOutcome};
pub use verbs::{Category, VerbDef, VerbTable};
