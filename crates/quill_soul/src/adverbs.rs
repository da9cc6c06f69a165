//! The adverb list and prefix lookup.
//!
//! The list is sorted, so a prefix selects a contiguous run.

/// All known adverbs, sorted.
pub const ADVERBS: &[&str] = &[
    "absentmindedly", "affectionately", "aggressively", "amusedly", "angrily", "anxiously",
    "apologetically", "arrogantly", "awkwardly", "bashfully", "bitterly", "blankly", "boldly",
    "bravely", "briefly", "brightly", "calmly", "carefully", "casually", "cheerfully", "clumsily",
    "coldly", "comfortingly", "confusedly", "contentedly", "coyly", "curiously", "cynically",
    "darkly", "deeply", "defiantly", "delightedly", "desperately", "dismally", "dreamily",
    "eagerly", "eastwards", "enthusiastically", "evilly", "excitedly", "fiercely", "firmly",
    "fondly", "forgetfully", "forgivingly", "frantically", "gently", "gleefully", "gracefully",
    "grimly", "grumpily", "happily", "hastily", "heartily", "helplessly", "hopefully", "humbly",
    "hungrily", "impatiently", "incoherently", "innocently", "inquisitively", "joyfully",
    "knowingly", "lazily", "loudly", "lovingly", "madly", "meekly", "merrily", "mischievously",
    "miserably", "mockingly", "mysteriously", "nervously", "noisily", "northeastwards",
    "northwards", "northwestwards", "obediently", "patiently", "pensively", "playfully",
    "politely", "proudly", "quickly", "quietly", "rudely", "sadistically", "sadly",
    "sarcastically", "seductively", "sheepishly", "shyly", "sickly", "sideways", "signally",
    "significantly", "silently", "sleepily", "slowly", "slyly", "smugly", "softly", "solemnly",
    "southeastwards", "southwards", "southwestwards", "sternly", "stupidly", "suspiciously",
    "sweetly", "tenderly", "thoughtfully", "tiredly", "triumphantly", "uncertainly", "warmly",
    "wearily", "westwards", "wickedly", "wildly", "wisely", "wistfully", "wryly",
];

/// Shortest prefix that may select an adverb.
pub const MIN_PREFIX: usize = 2;

/// True if `word` is exactly an adverb.
#[must_use]
pub fn is_adverb(word: &str) -> bool {
    ADVERBS.binary_search(&word).is_ok()
}

/// All adverbs starting with `prefix`, alphabetically.
///
/// Prefixes shorter than [`MIN_PREFIX`] match nothing.
#[must_use]
pub fn by_prefix(prefix: &str) -> Vec<&'static str> {
    if prefix.len() < MIN_PREFIX {
        return Vec::new();
    }
    let start = ADVERBS.partition_point(|a| *a < prefix);
    ADVERBS[start..]
        .iter()
        .take_while(|a| a.starts_with(prefix))
        .copied()
        .collect()
}
