//! Adverbs, body parts, qualifiers and spoken messages.

use quill_soul::{Soul, SoulError};

use crate::{JULIE, KATE, MAX, room};

fn say(line: &str) -> (String, String) {
    let mut soul = Soul::new();
    let out = soul.process_verb(&room(), JULIE, line, &[]).unwrap();
    (out.actor_message, out.room_message)
}

fn refusal(line: &str) -> String {
    let mut soul = Soul::new();
    match soul.parse(&room(), JULIE, line, &[]) {
        Err(SoulError::ParseError(msg)) => msg,
        other => panic!("{line}: unexpected {other:?}"),
    }
}

#[test]
fn adverb_prefixes_expand() {
    let mut soul = Soul::new();
    let parsed = soul.parse(&room(), JULIE, "grin sic at kate", &[]).unwrap();
    assert_eq!(parsed.adverb.as_deref(), Some("sickly"));
    assert_eq!(parsed.targets, [KATE]);
    assert_eq!(say("grin sic at kate").0, "You grin sickly at Kate.");
}

#[test]
fn ambiguous_adverbs_list_the_choices() {
    assert_eq!(refusal("smile forg"), "What adverb did you mean: forgetfully or forgivingly?");
}

#[test]
fn default_adverbs_apply_when_none_given() {
    assert_eq!(say("smile"), ("You smile happily.".to_string(), "Julie smiles happily.".to_string()));
    assert_eq!(say("smile sadly").0, "You smile sadly.");
}

#[test]
fn two_different_adverbs_conflict() {
    assert_eq!(refusal("smile sadly happily"), "You can't do that both sadly and happily.");
}

#[test]
fn body_parts() {
    assert_eq!(say("kick max knee").0, "You kick max on the knee.");
    assert_eq!(say("poke max nose").1, "Julie pokes max on the nose.");
    assert_eq!(refusal("kick max side knee"), "You can't do that both in the side and on the knee.");
}

#[test]
fn qualifiers_reshape_the_sentence() {
    assert_eq!(
        say("fail tickle max"),
        (
            "You try to tickle max, but fail miserably.".to_string(),
            "Julie tries to tickle max, but fails miserably.".to_string()
        )
    );
    // A failed attempt has no default manner.
    assert_eq!(say("fail smile").0, "You try to smile, but fail miserably.");
    assert_eq!(say("dont smile").1, "Julie doesn't smile happily.");
    assert_eq!(say("suddenly grin").1, "Julie suddenly grins evilly.");

    let mut soul = Soul::new();
    let parsed = soul.parse(&room(), JULIE, "doesn't grin at max", &[]).unwrap();
    assert_eq!(parsed.qualifier.as_deref(), Some("don't"));
    assert_eq!(parsed.full_verb(), "don't grin");
    assert_eq!(parsed.targets, [MAX]);
}

#[test]
fn spoken_messages() {
    assert_eq!(say("say").0, "You say something.");
    assert_eq!(say("say hello to kate").0, "You say 'hello' to Kate.");
    assert_eq!(say("say \"Good morning\" to max").1, "Julie says 'Good morning' to max.");

    let mut soul = Soul::new();
    let out = soul.process_verb(&room(), JULIE, "whisper cake is ready to kate", &[]).unwrap();
    assert_eq!(out.target_message, "Julie whispers 'cake is ready' to you.");
}
