//! Character creation through the login dialog.

use quill_engine::{Role, SchedulerConfig};
use quill_runtime::{DemoGame, scheduler};

use crate::support::{connect, demo, login};

#[test]
fn new_players_are_walked_through_creation() {
    let mut sched = demo(SchedulerConfig::default());
    let kate = connect(&mut sched);
    assert_eq!(
        kate.lines(),
        [
            "Welcome. We would like to know your player name before you can continue.",
            "Please type in your player name.",
        ]
    );
    assert!(sched.in_dialog(kate.id));

    kate.say(&mut sched, "Kate");
    assert_eq!(kate.lines(), ["What is the gender of your player character (m/f/n)?"]);

    kate.say(&mut sched, "f");
    assert_eq!(
        kate.lines(),
        [
            " name: kate,  gender: female",
            "You cannot change your name later. Do you want to create this character?",
        ]
    );

    kate.say(&mut sched, "yes");
    let lines = kate.lines();
    assert_eq!(lines[0], "Welcome, Kate.");
    assert_eq!(lines[1], "[Living room]");
    assert!(lines.contains(&"Garfield is here.".to_string()), "{lines:?}");
    assert!(!sched.in_dialog(kate.id));

    let conn = sched.connection(kate.id).unwrap();
    assert!(conn.actor().is_some());
    assert_eq!(conn.role(), Role::Player);
}

#[test]
fn bad_answers_are_asked_again() {
    let mut sched = demo(SchedulerConfig::default());
    let max = connect(&mut sched);
    max.lines();

    max.say(&mut sched, "m4x");
    assert_eq!(max.lines(), ["Names may only contain letters.", "Please type in your player name."]);
    max.say(&mut sched, "mx");
    assert_eq!(max.lines(), ["Names are 3 to 16 letters long.", "Please type in your player name."]);
    max.say(&mut sched, "garfield");
    assert_eq!(max.lines(), ["That name is already taken.", "Please type in your player name."]);

    max.say(&mut sched, "max");
    max.lines();
    max.say(&mut sched, "robot");
    assert_eq!(
        max.lines(),
        ["That is not a valid gender.", "What is the gender of your player character (m/f/n)?"]
    );
    max.say(&mut sched, "m");
    max.lines();
    max.say(&mut sched, "maybe");
    assert_eq!(
        max.lines(),
        [
            "That is not a valid answer.",
            "You cannot change your name later. Do you want to create this character?",
        ]
    );
    max.say(&mut sched, "no");
    assert_eq!(max.lines(), ["Ok, let's get back to the beginning then.", "Please type in your player name."]);
    assert!(sched.game().world().find_living("max").is_none());
}

#[test]
fn names_in_use_cannot_be_taken_twice() {
    let mut sched = demo(SchedulerConfig::default());
    let _kate = login(&mut sched, "kate", "f");
    let other = connect(&mut sched);
    other.lines();
    other.say(&mut sched, "Kate");
    assert_eq!(other.lines(), ["That name is already taken.", "Please type in your player name."]);
}

#[test]
fn wizards_prove_who_they_are() {
    let game = DemoGame::new().with_wizard("irmen", "hunter2");
    let mut sched = scheduler(SchedulerConfig::default(), game, None);

    let intruder = connect(&mut sched);
    intruder.lines();
    intruder.say(&mut sched, "Irmen");
    assert_eq!(intruder.lines(), ["Please type in the admin password."]);
    intruder.say(&mut sched, "guess");
    assert_eq!(intruder.lines(), ["That password is not correct.", "Please type in your player name."]);

    intruder.say(&mut sched, "irmen");
    intruder.say(&mut sched, "hunter2");
    intruder.say(&mut sched, "m");
    intruder.say(&mut sched, "y");
    let conn = sched.connection(intruder.id).unwrap();
    assert_eq!(conn.role(), Role::Wizard);
}

#[test]
fn everyone_present_sees_arrivals() {
    let mut sched = demo(SchedulerConfig::default());
    let kate = login(&mut sched, "kate", "f");
    let _max = login(&mut sched, "max", "m");
    assert_eq!(kate.lines(), ["Max arrives."]);
}
