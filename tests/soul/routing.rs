//! Lines the soul hands back: exits, movement, caller-handled verbs.

use quill_soul::{ParseResult, Soul, SoulError};

use crate::{DOOR, JULIE, KATE, NORTH, room};

fn routed(line: &str, external: &[&str]) -> ParseResult {
    let mut soul = Soul::new();
    match soul.parse(&room(), JULIE, line, external) {
        Err(SoulError::NonSoulVerb(parsed)) => *parsed,
        other => panic!("{line}: unexpected {other:?}"),
    }
}

fn refusal(line: &str) -> String {
    let mut soul = Soul::new();
    match soul.parse(&room(), JULIE, line, &[]) {
        Err(SoulError::ParseError(msg)) => msg,
        other => panic!("{line}: unexpected {other:?}"),
    }
}

#[test]
fn exit_names_are_movement_shortcuts() {
    let parsed = routed("garden door", &[]);
    assert_eq!(parsed.verb, "garden door");
    assert_eq!(parsed.targets, [DOOR]);

    assert_eq!(routed("n", &[]).targets, [NORTH]);
    assert_eq!(routed("north", &[]).targets, [NORTH]);
}

#[test]
fn movement_verbs_lead_to_exits() {
    let parsed = routed("walk to the garden door", &[]);
    assert_eq!(parsed.verb, "garden door");
    assert_eq!(parsed.targets, [DOOR]);

    assert_eq!(refusal("crawl"), "Crawl where?");
    assert_eq!(refusal("crawl up"), "You can't crawl there.");
}

#[test]
fn directions_without_an_exit_are_unknown_verbs() {
    let mut soul = Soul::new();
    match soul.parse(&room(), JULIE, "south", &[]) {
        Err(SoulError::UnknownVerb { verb, words, qualifier }) => {
            assert_eq!(verb, "south");
            assert_eq!(words, ["south"]);
            assert!(qualifier.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unknown_verbs_keep_their_words() {
    let mut soul = Soul::new();
    match soul.parse(&room(), JULIE, "suddenly frobnicate the cat", &[]) {
        Err(SoulError::UnknownVerb { verb, words, qualifier }) => {
            assert_eq!(verb, "frobnicate");
            assert_eq!(words, ["frobnicate", "the", "cat"]);
            assert_eq!(qualifier.as_deref(), Some("suddenly"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn caller_verbs_come_back_parsed() {
    let parsed = routed("look at Kate", &["look"]);
    assert_eq!(parsed.verb, "look");
    assert_eq!(parsed.targets, [KATE]);
    assert_eq!(parsed.unparsed, "at Kate");

    let parsed = routed("wait 20 minutes", &["look", "wait"]);
    assert_eq!(parsed.unparsed, "20 minutes");
    assert_eq!(parsed.unrecognized, ["20", "minutes"]);
    assert!(parsed.targets.is_empty());

    let parsed = routed("fail look", &["look"]);
    assert_eq!(parsed.qualifier.as_deref(), Some("fail"));
    assert!(parsed.unparsed.is_empty());
}

#[test]
fn caller_verbs_shadow_soul_verbs() {
    let parsed = routed("smile", &["smile"]);
    assert_eq!(parsed.verb, "smile");
}
