//! Pronoun and possessive agreement for male, female and neuter actors.

use quill_foundation::{EntityId, Gender};
use quill_soul::{Descriptor, Locale, Soul};

use crate::{JULIE, KATE, MAX, room};

const ROBOT: EntityId = EntityId::new(9, 0);

fn house() -> Locale {
    room().with(Descriptor::living(ROBOT, "robot", Gender::Neuter))
}

#[test]
fn every_gender_renders_its_own_forms() {
    let cases = [
        (JULIE, "Julie", "her", "herself", "she"),
        (MAX, "Max", "his", "himself", "he"),
        (ROBOT, "Robot", "its", "itself", "it"),
    ];
    for (actor, name, poss, refl, subj) in cases {
        let mut soul = Soul::new();

        let hug = soul.process_verb(&house(), actor, "hug myself", &[]).unwrap();
        assert_eq!(hug.actor_message, "You hug yourself.");
        assert_eq!(hug.room_message, format!("{name} hugs {refl}."));
        assert!(hug.targets.is_empty());

        let alone = soul.process_verb(&house(), actor, "ayt me", &[]).unwrap();
        assert_eq!(
            alone.actor_message,
            "You wave your hand in front of your own face, are you there?"
        );
        assert_eq!(
            alone.room_message,
            format!("{name} waves {poss} hand in front of {poss} own face, is {subj} there?")
        );

        let at_kate = soul.process_verb(&house(), actor, "ayt kate", &[]).unwrap();
        assert_eq!(
            at_kate.actor_message,
            "You wave your hand in front of Kate's face, is she there?"
        );
        assert_eq!(
            at_kate.room_message,
            format!("{name} waves {poss} hand in front of Kate's face, is she there?")
        );
        assert_eq!(
            at_kate.target_message,
            format!("{name} waves {poss} hand in front of your face, are you there?")
        );
        assert!(at_kate.targets.contains(&KATE));
    }
}

#[test]
fn target_gender_picks_the_question() {
    let mut soul = Soul::new();
    let out = soul.process_verb(&house(), JULIE, "ayt robot", &[]).unwrap();
    assert_eq!(out.room_message, "Julie waves her hand in front of robot's face, is it there?");
    let out = soul.process_verb(&house(), JULIE, "ayt max", &[]).unwrap();
    assert_eq!(out.room_message, "Julie waves her hand in front of max's face, is he there?");
}
