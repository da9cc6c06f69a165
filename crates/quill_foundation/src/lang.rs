//! Small English helpers used when composing messages.

use crate::error::Error;
use crate::gender::Gender;

/// Joins words into an English list with an Oxford comma.
///
/// ```
/// use quill_foundation::lang::join;
/// assert_eq!(join(&["a", "b", "c"], "and"), "a, b, and c");
/// assert_eq!(join(&["a", "b"], "or"), "a or b");
/// ```
#[must_use]
pub fn join<S: AsRef<str>>(words: &[S], conj: &str) -> String {
    match words {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {conj} {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{}, {conj} {}", head.join(", "), last.as_ref())
        }
    }
}

/// Uppercases the first character.
#[must_use]
pub fn capital(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Appends a period unless the sentence already ends in terminal punctuation.
#[must_use]
pub fn fullstop(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.is_empty() || trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_string()
    } else {
        format!("{trimmed}.")
    }
}

/// Possessive form of a name or reflexive pronoun.
#[must_use]
pub fn possessive(name: &str) -> String {
    match name {
        "you" => "your".to_string(),
        "yourself" => "your own".to_string(),
        "himself" => "his own".to_string(),
        "herself" => "her own".to_string(),
        "itself" => "its own".to_string(),
        _ => format!("{name}'s"),
    }
}

/// Third person singular present of a verb ("grin" → "grins").
#[must_use]
pub fn conjugate(verb: &str) -> String {
    match verb {
        "be" => return "is".to_string(),
        "have" => return "has".to_string(),
        "do" => return "does".to_string(),
        "go" => return "goes".to_string(),
        _ => {}
    }
    if let Some(stem) = verb.strip_suffix('y') {
        if stem.ends_with(|c: char| !"aeiou".contains(c)) && !stem.is_empty() {
            return format!("{stem}ies");
        }
    }
    if ["s", "sh", "ch", "x", "z", "o"].iter().any(|end| verb.ends_with(end)) {
        return format!("{verb}es");
    }
    format!("{verb}s")
}

/// Indefinite article for a word.
#[must_use]
pub fn a(word: &str) -> String {
    let article = if word.starts_with(['a', 'e', 'i', 'o', 'u', 'A', 'E', 'I', 'O', 'U']) {
        "an"
    } else {
        "a"
    };
    format!("{article} {word}")
}

/// Interprets a yes/no answer.
///
/// # Errors
///
/// Returns [`crate::ErrorKind::InvalidInput`] for anything that is neither.
pub fn yesno(answer: &str) -> crate::Result<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "yep" | "yeah" | "sure" | "ok" | "okay" => Ok(true),
        "n" | "no" | "nope" | "hell no" | "no way" => Ok(false),
        _ => Err(Error::invalid_input("That is not a valid answer.")),
    }
}

/// Interprets a gender answer ("f", "Male", ...).
///
/// # Errors
///
/// Returns [`crate::ErrorKind::InvalidInput`] when the answer names no gender.
pub fn validate_gender(answer: &str) -> crate::Result<Gender> {
    answer.parse()
}
