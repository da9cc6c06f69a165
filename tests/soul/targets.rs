//! Who an emote is aimed at.

use quill_soul::{Soul, SoulError};

use crate::{CAT, JULIE, KATE, MAX, NEWSPAPER, OLD_MAN, room};

#[test]
fn repeated_names_keep_every_mention() {
    let mut soul = Soul::new();
    let parsed = soul.parse(&room(), JULIE, "slap kate, cat and cat", &[]).unwrap();
    assert_eq!(parsed.targets, [KATE, CAT, CAT]);
    assert_eq!(parsed.who_info.len(), 2);
    assert_eq!(parsed.who_info[&CAT].sequence, 1);
}

#[test]
fn aliases_and_titles_both_name_the_cat() {
    let mut soul = Soul::new();
    for line in ["pat cat", "pat garfield", "pat the cat"] {
        let parsed = soul.parse(&room(), JULIE, line, &[]).unwrap();
        assert_eq!(parsed.targets, [CAT], "{line}");
    }
}

#[test]
fn multi_word_names_match_whole() {
    let mut soul = Soul::new();
    let parsed = soul.parse(&room(), JULIE, "poke old man", &[]).unwrap();
    assert_eq!(parsed.targets, [OLD_MAN]);
    assert_eq!(parsed.args, ["old man"]);
}

#[test]
fn everyone_but_some() {
    let mut soul = Soul::new();
    let parsed = soul.parse(&room(), JULIE, "wave at everyone except max and cat", &[]).unwrap();
    assert_eq!(parsed.targets, [KATE, OLD_MAN]);
}

#[test]
fn self_targets_render_reflexively() {
    let mut soul = Soul::new();
    let out = soul.process_verb(&room(), JULIE, "hug myself", &[]).unwrap();
    assert_eq!(out.actor_message, "You hug yourself.");
    assert_eq!(out.room_message, "Julie hugs herself.");
    assert!(out.targets.is_empty());
}

#[test]
fn targets_receive_their_own_message() {
    let mut soul = Soul::new();
    let out = soul.process_verb(&room(), JULIE, "poke max", &[]).unwrap();
    assert_eq!(out.actor_message, "You poke max in the ribs.");
    assert_eq!(out.target_message, "Julie pokes you in the ribs.");
    assert_eq!(out.room_message, "Julie pokes max in the ribs.");
    assert!(out.targets.contains(&MAX));
}

#[test]
fn items_need_a_verb_that_allows_them() {
    let mut soul = Soul::new();
    let err = soul.process_verb(&room(), JULIE, "tickle paper", &[]).unwrap_err();
    assert_eq!(err.to_string(), "You can't tickle that.");

    let out = soul.process_verb(&room(), JULIE, "wave at newspaper", &[]).unwrap();
    assert!(out.targets.contains(&NEWSPAPER));
}

#[test]
fn physical_verbs_need_someone() {
    let mut soul = Soul::new();
    match soul.parse(&room(), JULIE, "hug", &[]) {
        Err(SoulError::ParseError(msg)) => assert_eq!(msg, "The verb hug needs a person."),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unknown_words_are_reported() {
    let mut soul = Soul::new();
    let err = soul.parse(&room(), JULIE, "smile zzyzx", &[]).unwrap_err();
    assert_eq!(err.to_string(), "It's not clear what you mean by 'zzyzx'.");
}
