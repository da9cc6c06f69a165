//! Outcomes of interpretation that are not a rendered emote.

use thiserror::Error;

use crate::result::ParseResult;

/// Why a command line did not become a soul emote.
///
/// All three end a single command cycle at the dispatcher; none are fatal.
#[derive(Debug, Error)]
pub enum SoulError {
    /// No verb was recognized.
    #[error("The verb '{verb}' is unrecognized.")]
    UnknownVerb {
        /// The word in verb position.
        verb: String,
        /// Words from that position onward.
        words: Vec<String>,
        /// Qualifier parsed before the failure.
        qualifier: Option<String>,
    },

    /// The verb is known but the rest is malformed or ambiguous.
    #[error("{0}")]
    ParseError(String),

    /// The verb belongs to the caller, not the soul; parsing so far is kept.
    #[error("not a soul verb: {0}")]
    NonSoulVerb(Box<ParseResult>),
}

impl SoulError {
    /// Creates a parse error with a user-facing message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }
}
