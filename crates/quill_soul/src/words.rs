//! Word classes the interpreter recognizes besides verbs and adverbs.

/// Words that carry no meaning for emotes and are skipped.
pub const IGNORE_WORDS: &[&str] = &[
    ",", "a", "about", "an", "and", "at", "by", "for", "from", "in", "into", "of", "on", "onto",
    "the", "to", "towards", "upon", "with",
];

/// Prepositions that end a free-form spoken message and introduce targets.
pub const MESSAGE_END_WORDS: &[&str] = &["to", "at"];

/// Words meaning the actor.
pub const SELF_WORDS: &[&str] = &["me", "myself", "self"];

/// Words meaning every other living present.
pub const EVERYONE_WORDS: &[&str] = &["all", "everyone", "everybody"];

/// Words that turn the following names into exclusions after "all".
pub const EXCEPT_WORDS: &[&str] = &["but", "except"];

/// Pronouns resolved against the previous command's targets.
pub const PRONOUNS: &[&str] = &["him", "her", "it", "them"];

/// Compass and vertical directions.
pub const DIRECTIONS: &[&str] = &[
    "north", "south", "east", "west", "northeast", "northwest", "southeast", "southwest", "up",
    "down", "n", "s", "e", "w", "ne", "nw", "se", "sw", "u", "d",
];

/// Body parts and the phrase each renders as.
pub const BODY_PARTS: &[(&str, &str)] = &[
    ("arm", "on the arm"),
    ("back", "on the back"),
    ("bottom", "on the bottom"),
    ("cheek", "on the cheek"),
    ("chest", "on the chest"),
    ("ear", "on the ear"),
    ("foot", "on the foot"),
    ("hand", "on the hand"),
    ("head", "on the head"),
    ("knee", "on the knee"),
    ("leg", "on the leg"),
    ("neck", "on the neck"),
    ("nose", "on the nose"),
    ("ribs", "in the ribs"),
    ("shoulder", "on the shoulder"),
    ("side", "in the side"),
    ("stomach", "in the stomach"),
];

/// Canonical qualifier for a leading word, if it is one.
///
/// Contracted negations all normalize to `don't`.
#[must_use]
pub fn qualifier(word: &str) -> Option<&'static str> {
    match word {
        "fail" => Some("fail"),
        "don't" | "dont" | "doesn't" | "doesnt" => Some("don't"),
        "suddenly" => Some("suddenly"),
        _ => None,
    }
}

/// True for skippable filler words.
#[must_use]
pub fn is_ignored(word: &str) -> bool {
    IGNORE_WORDS.contains(&word)
}

/// True for compass directions and their abbreviations.
#[must_use]
pub fn is_direction(word: &str) -> bool {
    DIRECTIONS.contains(&word)
}

/// The rendered phrase for a body part word.
#[must_use]
pub fn body_part(word: &str) -> Option<&'static str> {
    BODY_PARTS
        .iter()
        .find(|(part, _)| *part == word)
        .map(|(_, phrase)| *phrase)
}
