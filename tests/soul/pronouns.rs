//! Pronouns refer back to the same actor's previous targets.

use quill_soul::{Soul, SoulError};

use crate::{JULIE, KATE, MAX, room};

fn parse_error(soul: &mut Soul, locale: &quill_soul::Locale, actor: quill_foundation::EntityId, line: &str) -> String {
    match soul.parse(locale, actor, line, &[]) {
        Err(SoulError::ParseError(msg)) => msg,
        other => panic!("{line}: unexpected {other:?}"),
    }
}

#[test]
fn her_means_the_woman_just_mentioned() {
    let mut soul = Soul::new();
    let locale = room();
    soul.parse(&locale, JULIE, "grin at kate", &[]).unwrap();
    let parsed = soul.parse(&locale, JULIE, "poke her", &[]).unwrap();
    assert_eq!(parsed.targets, [KATE]);
    assert_eq!(parsed.feedback, ["(By 'her', it is assumed you mean Kate.)"]);

    let out = soul.process_verb_parsed(&locale, JULIE, &parsed).unwrap();
    assert_eq!(out.feedback, parsed.feedback);
}

#[test]
fn them_means_everyone_just_mentioned() {
    let mut soul = Soul::new();
    let locale = room();
    soul.parse(&locale, JULIE, "tickle kate and max", &[]).unwrap();
    let parsed = soul.parse(&locale, JULIE, "hug them", &[]).unwrap();
    assert_eq!(parsed.targets, [KATE, MAX]);
    assert_eq!(parsed.feedback, ["(By 'them', it is assumed you mean: Kate and max.)"]);
}

#[test]
fn wrong_gender_finds_nobody() {
    let mut soul = Soul::new();
    let locale = room();
    soul.parse(&locale, JULIE, "grin at kate", &[]).unwrap();
    assert_eq!(parse_error(&mut soul, &locale, JULIE, "poke him"), "It is not clear who you're referring to.");
}

#[test]
fn actors_do_not_share_antecedents() {
    let mut soul = Soul::new();
    let locale = room();
    soul.parse(&locale, JULIE, "grin at kate", &[]).unwrap();
    assert_eq!(parse_error(&mut soul, &locale, MAX, "poke her"), "It is not clear who you're referring to.");
    assert_eq!(soul.memory().antecedents(JULIE), [KATE]);
}

#[test]
fn failed_commands_keep_the_old_antecedents() {
    let mut soul = Soul::new();
    let locale = room();
    soul.parse(&locale, JULIE, "grin at kate", &[]).unwrap();
    assert!(soul.parse(&locale, JULIE, "hug", &[]).is_err());
    assert_eq!(soul.parse(&locale, JULIE, "poke her", &[]).unwrap().targets, [KATE]);
}

#[test]
fn departed_antecedents_are_reported() {
    let mut soul = Soul::new();
    let mut locale = room();
    soul.parse(&locale, JULIE, "grin at kate", &[]).unwrap();
    locale.remove(KATE);
    assert_eq!(parse_error(&mut soul, &locale, JULIE, "poke her"), "She is no longer around.");
}

#[test]
fn forgetting_an_actor_clears_their_memory() {
    let mut soul = Soul::new();
    let locale = room();
    soul.parse(&locale, JULIE, "grin at kate", &[]).unwrap();
    soul.forget(JULIE);
    assert!(soul.memory().antecedents(JULIE).is_empty());
    assert_eq!(parse_error(&mut soul, &locale, JULIE, "poke her"), "It is not clear who you're referring to.");
}
