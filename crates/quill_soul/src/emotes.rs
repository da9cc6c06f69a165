//! The built-in social verbs.

use crate::verbs::{VerbDef, VerbTable};

/// Returns the standard verb table.
#[must_use]
pub fn standard() -> VerbTable {
    VerbTable::from_entries(STANDARD.iter().map(|(verb, def)| (*verb, *def)))
}

/// Built-in verbs and their definitions.
pub const STANDARD: &[(&str, VerbDef)] = &[
    // ========================================================================
    // Bare
    // ========================================================================
    ("ah", VerbDef::bare("$go 'ah' {how}")),
    ("blush", VerbDef::bare("$blush {how}")),
    ("burp", VerbDef::bare("$burp {how}").adverb("rudely")),
    ("cheer", VerbDef::bare("$cheer {how}").adverb("enthusiastically")),
    ("cry", VerbDef::bare("$burst into tears {how}")),
    ("dance", VerbDef::bare("$dance {how}").adverb("merrily")),
    ("die", VerbDef::bare("$fall down and play dead {how}").others("$fall to the ground, dead")),
    ("faint", VerbDef::bare("$faint {how}")),
    ("ponder", VerbDef::bare("$ponder {how}").adverb("thoughtfully")),
    ("shiver", VerbDef::bare("$shiver {how}")),
    ("sit", VerbDef::bare("$sit down {how}")),
    ("sneeze", VerbDef::bare("$sneeze {how}").adverb("loudly")),
    ("stomp", VerbDef::bare("$stomp {your} foot {how}")),
    ("yawn", VerbDef::bare("$yawn {how}").nonliving_ok()),
    // ========================================================================
    // Optional target
    // ========================================================================
    ("blink", VerbDef::optional("$blink {how}", "$blink {how} at {who}")),
    ("bow", VerbDef::optional("$bow {how}", "$bow {how} to {who}").adverb("gracefully")),
    ("clap", VerbDef::optional("$clap {how}", "$clap {how} for {who}")),
    ("cough", VerbDef::optional("$cough {how}", "$cough {how} at {who}")),
    ("drool", VerbDef::optional("$drool {how}", "$drool {how} on {who}")),
    ("frown", VerbDef::optional("$frown {how}", "$frown {how} at {who}")),
    ("giggle", VerbDef::optional("$giggle {how}", "$giggle {how} at {who}").adverb("merrily")),
    ("grin", VerbDef::optional("$grin {how}", "$grin {how} at {who}").adverb("evilly")),
    ("growl", VerbDef::optional("$growl {how}", "$growl {how} at {who}").aggressive()),
    ("jump", VerbDef::optional("$jump {how}", "$jump {how} at {who}")),
    ("laugh", VerbDef::optional("$laugh {how}", "$laugh {how} at {who}")),
    ("nod", VerbDef::optional("$nod {how}", "$nod {how} at {who}").nonliving_ok()),
    ("peer", VerbDef::optional("$peer {how}", "$peer {how} at {who}").nonliving_ok()),
    ("point", VerbDef::optional("$point {how}", "$point {how} at {who}").nonliving_ok()),
    ("puzzle", VerbDef::optional("$look puzzled {how}", "$look puzzled {how} at {who}")),
    ("shrug", VerbDef::optional("$shrug {how}", "$shrug {how} at {who}")),
    ("sigh", VerbDef::optional("$sigh {how}", "$sigh {how} at {who}")),
    ("smile", VerbDef::optional("$smile {how}", "$smile {how} at {who}").adverb("happily")),
    ("wave", VerbDef::optional("$wave {how}", "$wave {how} at {who}").nonliving_ok()),
    ("wink", VerbDef::optional("$wink {how}", "$wink {how} at {who}").adverb("suggestively")),
    // ========================================================================
    // Physical
    // ========================================================================
    ("beep", VerbDef::physical("{how} $beep {who} {where}").adverb("triumphantly").bodypart("on the nose")),
    ("bonk", VerbDef::physical("$bonk {who} {where}").bodypart("on the head").aggressive()),
    ("cuddle", VerbDef::physical("$cuddle {who} {how}")),
    ("greet", VerbDef::physical("$greet {who} {how}")),
    ("hold", VerbDef::physical("$hold {who} in {your} arms {how}")),
    ("hug", VerbDef::physical("$hug {who} {how}")),
    ("kick", VerbDef::physical("$kick {who} {how} {where}").aggressive()),
    ("kiss", VerbDef::physical("$kiss {who} {how} {where}")),
    ("pat", VerbDef::physical("$pat {who} {how} {where}").bodypart("on the head")),
    ("poke", VerbDef::physical("$poke {who} {how} {where}").bodypart("in the ribs").aggressive()),
    ("pounce", VerbDef::physical("$pounce {who} {how}").adverb("playfully")),
    ("slap", VerbDef::physical("$slap {who} {how} {where}").aggressive()),
    ("tease", VerbDef::physical("$tease {who} {how}")),
    ("tickle", VerbDef::physical("$tickle {who} {how} {where}")),
    ("touch", VerbDef::physical("$touch {who} {how} {where}").nonliving_ok()),
    ("turn", VerbDef::physical("$turn {your} head towards {who} {how}").nonliving_ok()),
    // ========================================================================
    // Personal
    // ========================================================================
    ("ayt", VerbDef::personal("$wave {your} hand {how}", "$wave {your} hand in front of {poss} face, {is} there?")),
    ("fear", VerbDef::personal("$shiver with fear {how}", "$fear {who} {how}")),
    ("watch", VerbDef::personal("$watch the surroundings {how}", "$watch {who} {how}").adverb("carefully").nonliving_ok()),
    // ========================================================================
    // Speech
    // ========================================================================
    ("ask", VerbDef::speech(None, "$ask {who} {how}: {question}").message("what's up")),
    ("babble", VerbDef::speech(Some("$babble {what} {how}"), "$babble {what} {how} to {who}").message("something").adverb("incoherently")),
    ("chant", VerbDef::speech(Some("{how} $chant: {msg}"), "{how} $chant to {who}: {msg}").message("Hare Krishna Krishna Hare Hare")),
    ("mumble", VerbDef::speech(Some("$mumble {what} {how}"), "$mumble {what} {how} to {who}").message("something")),
    ("reply", VerbDef::speech(None, "$reply {how} to {who}: {msg}").message("yes")),
    ("say", VerbDef::speech(Some("$say {what} {how}"), "$say {what} {how} to {who}").message("something")),
    ("scream", VerbDef::speech(Some("$scream {what} {how}"), "$scream {what} {how} at {who}").adverb("loudly")),
    ("whisper", VerbDef::speech(Some("$whisper {what} {how}"), "$whisper {what} {how} to {who}").message("something")),
    // ========================================================================
    // Movement
    // ========================================================================
    ("climb", VerbDef::movement()),
    ("crawl", VerbDef::movement()),
    ("enter", VerbDef::movement()),
    ("go", VerbDef::movement()),
    ("run", VerbDef::movement()),
    ("swim", VerbDef::movement()),
    ("walk", VerbDef::movement()),
];
