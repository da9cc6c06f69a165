//! Grammatical gender and the pronoun forms that follow from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Grammatical gender of a living or object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    /// he / him / his
    Male,
    /// she / her / her
    Female,
    /// it / it / its
    #[default]
    Neuter,
}

impl Gender {
    /// Subject pronoun ("he").
    #[must_use]
    pub const fn subjective(self) -> &'static str {
        match self {
            Self::Male => "he",
            Self::Female => "she",
            Self::Neuter => "it",
        }
    }

    /// Object pronoun ("him").
    #[must_use]
    pub const fn objective(self) -> &'static str {
        match self {
            Self::Male => "him",
            Self::Female => "her",
            Self::Neuter => "it",
        }
    }

    /// Possessive determiner ("his").
    #[must_use]
    pub const fn possessive(self) -> &'static str {
        match self {
            Self::Male => "his",
            Self::Female => "her",
            Self::Neuter => "its",
        }
    }

    /// Reflexive pronoun ("himself").
    #[must_use]
    pub const fn reflexive(self) -> &'static str {
        match self {
            Self::Male => "himself",
            Self::Female => "herself",
            Self::Neuter => "itself",
        }
    }

    /// The gender an object pronoun refers to, if `word` is one.
    #[must_use]
    pub fn from_objective(word: &str) -> Option<Self> {
        match word {
            "him" => Some(Self::Male),
            "her" => Some(Self::Female),
            "it" => Some(Self::Neuter),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Neuter => "neuter",
        };
        f.write_str(name)
    }
}

impl FromStr for Gender {
    type Err = Error;

    /// Accepts `m`/`f`/`n` and the full words, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Self::Male),
            "f" | "female" => Ok(Self::Female),
            "n" | "neuter" | "neutral" => Ok(Self::Neuter),
            _ => Err(Error::invalid_input("That is not a valid gender.")),
        }
    }
}
