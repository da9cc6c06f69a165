//! Verb tables: the standard set and adjusted copies.

use quill_soul::{Soul, SoulError, VerbDef, emotes};

use crate::{JULIE, room};

#[test]
fn standard_table_is_sorted_and_complete() {
    let soul = Soul::new();
    let verbs: Vec<&str> = soul.verbs().verbs().collect();
    assert!(verbs.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(verbs.len(), emotes::standard().len());
    for verb in ["smile", "hug", "poke", "say", "crawl"] {
        assert!(soul.verbs().contains(verb), "{verb}");
    }
    assert!(soul.verbs().movement().contains(&"walk"));
}

#[test]
fn adjusted_tables_change_what_parses() {
    let mut soul = Soul::new();
    let table = soul.verbs().adjust(
        &[],
        &["slap"],
        &[("boop", VerbDef::physical("$boop {who} {how} {where}").bodypart("on the nose"))],
    );
    soul.set_verbs(table);

    assert!(matches!(
        soul.parse(&room(), JULIE, "slap kate", &[]),
        Err(SoulError::UnknownVerb { .. })
    ));
    let out = soul.process_verb(&room(), JULIE, "boop kate", &[]).unwrap();
    assert_eq!(out.actor_message, "You boop Kate on the nose.");
    assert_eq!(out.target_message, "Julie boops you on the nose.");
}

#[test]
fn restricted_tables_keep_only_allowed_verbs() {
    let table = Soul::new().verbs().adjust(&["smile", "wave"], &[], &[]);
    let mut soul = Soul::with_verbs(table);
    assert_eq!(soul.verbs().len(), 2);
    assert!(soul.process_verb(&room(), JULIE, "smile", &[]).is_ok());
    assert!(soul.process_verb(&room(), JULIE, "grin", &[]).is_err());
}
