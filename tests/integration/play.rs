//! Playing in the house: emotes, movement, time, leaving.

use std::time::Duration;

use chrono::TimeDelta;
use quill_engine::{Mode, SchedulerConfig};

use crate::support::{demo, login};

#[test]
fn emotes_reach_actor_target_and_bystanders() {
    let mut sched = demo(SchedulerConfig::default());
    let kate = login(&mut sched, "kate", "f");
    let max = login(&mut sched, "max", "m");
    let julie = login(&mut sched, "julie", "f");
    kate.lines();
    max.lines();

    kate.say(&mut sched, "poke max");
    assert_eq!(kate.lines(), ["You poke Max in the ribs."]);
    assert_eq!(max.lines(), ["Kate pokes you in the ribs."]);
    assert_eq!(julie.lines(), ["Kate pokes Max in the ribs."]);
}

#[test]
fn interpreter_refusals_go_to_the_actor_only() {
    let mut sched = demo(SchedulerConfig::default());
    let kate = login(&mut sched, "kate", "f");
    let max = login(&mut sched, "max", "m");
    kate.lines();

    kate.say(&mut sched, "frobnicate");
    assert_eq!(kate.lines(), ["The verb 'frobnicate' is unrecognized."]);
    kate.say(&mut sched, "south");
    assert_eq!(kate.lines(), ["You can't go in that direction."]);
    kate.say(&mut sched, "fail look");
    assert_eq!(kate.lines(), ["That action doesn't support qualifiers."]);
    kate.say(&mut sched, "hug");
    assert_eq!(kate.lines(), ["The verb hug needs a person."]);
    assert!(max.lines().is_empty());
}

#[test]
fn pronouns_are_explained() {
    let mut sched = demo(SchedulerConfig::default());
    let kate = login(&mut sched, "kate", "f");
    let _max = login(&mut sched, "max", "m");
    kate.lines();

    kate.say(&mut sched, "wave at max");
    kate.lines();
    kate.say(&mut sched, "hug him");
    assert_eq!(
        kate.lines(),
        ["(By 'him', it is assumed you mean Max.)", "You hug Max."]
    );
}

#[test]
fn the_cat_has_opinions() {
    let mut sched = demo(SchedulerConfig::default());
    let kate = login(&mut sched, "kate", "f");
    let max = login(&mut sched, "max", "m");
    kate.lines();

    kate.say(&mut sched, "pat cat");
    assert_eq!(
        kate.lines(),
        ["You pat Garfield on the head.", "Garfield curls up in a ball and purrs contently."]
    );
    assert_eq!(
        max.lines(),
        ["Kate pats Garfield on the head.", "Garfield curls up in a ball and purrs contently."]
    );

    kate.say(&mut sched, "wave at garfield");
    assert_eq!(kate.lines(), ["You wave at Garfield.", "Garfield stares at you incomprehensibly."]);
}

#[test]
fn walking_between_rooms() {
    let mut sched = demo(SchedulerConfig::default());
    let kate = login(&mut sched, "kate", "f");
    let max = login(&mut sched, "max", "m");
    kate.lines();

    kate.say(&mut sched, "garden");
    let lines = kate.lines();
    assert_eq!(lines[0], "[Garden]");
    assert_eq!(max.lines(), ["Kate leaves."]);

    // Out of earshot now.
    kate.say(&mut sched, "smile");
    assert!(max.lines().is_empty());

    kate.say(&mut sched, "go north");
    assert_eq!(kate.lines()[0], "[Living room]");
    assert_eq!(max.lines(), ["Kate arrives."]);

    kate.say(&mut sched, "closet");
    let lines = kate.lines();
    assert!(lines.contains(&"You see a small rusty key.".to_string()), "{lines:?}");
}

#[test]
fn waiting_moves_the_clock_in_single_player() {
    let config = SchedulerConfig::default()
        .with_time_factor(60.0)
        .with_tick_interval(Duration::from_secs(1));
    let mut sched = demo(config);
    let kate = login(&mut sched, "kate", "f");

    kate.say(&mut sched, "wait 30");
    let lines = kate.lines();
    assert_eq!(lines[0], "Time passes.");
    assert_eq!(sched.clock().elapsed(), TimeDelta::minutes(30));
    // The cat kept living meanwhile.
    assert!(lines.iter().any(|l| l == "Garfield purrs happily."), "{lines:?}");

    kate.say(&mut sched, "wait soon");
    assert_eq!(kate.lines(), ["How long do you want to wait (in minutes)?"]);
    kate.say(&mut sched, "time");
    assert_eq!(kate.lines(), ["It is now 1970-01-01 00:30:00."]);
}

#[test]
fn waiting_less_than_a_tick_is_refused() {
    let config = SchedulerConfig::default().with_tick_interval(Duration::from_secs(600));
    let mut sched = demo(config);
    let kate = login(&mut sched, "kate", "f");
    kate.say(&mut sched, "wait 5");
    assert_eq!(kate.lines(), ["It's no use waiting such a short while."]);
    assert_eq!(sched.clock().elapsed(), TimeDelta::zero());
}

#[test]
fn waiting_too_long_is_refused() {
    let config = SchedulerConfig::default()
        .with_time_factor(60.0)
        .with_max_wait(TimeDelta::hours(2));
    let mut sched = demo(config);
    let kate = login(&mut sched, "kate", "f");

    for minutes in ["121", "100000", "200000000000000"] {
        kate.say(&mut sched, &format!("wait {minutes}"));
        assert_eq!(kate.lines(), ["You can't wait that long; 2 hours at most."]);
    }
    assert_eq!(sched.clock().elapsed(), TimeDelta::zero());

    kate.say(&mut sched, "wait 120");
    assert_eq!(kate.lines()[0], "Time passes.");
    assert_eq!(sched.clock().elapsed(), TimeDelta::hours(2));
}

#[test]
fn nobody_waits_in_a_shared_world() {
    let mut sched = demo(SchedulerConfig::default().with_mode(Mode::MultiActor));
    let kate = login(&mut sched, "kate", "f");
    kate.say(&mut sched, "wait 5");
    assert_eq!(kate.lines(), ["Time waits for no one here."]);
}

#[test]
fn the_clock_chimes_on_the_hour() {
    let config = SchedulerConfig::default().with_time_factor(3600.0);
    let mut sched = demo(config);
    let kate = login(&mut sched, "kate", "f");

    sched.step(true).unwrap();
    sched.step(true).unwrap();
    let lines = kate.lines();
    assert!(lines.contains(&"The grandfather clock chimes 2 times.".to_string()), "{lines:?}");
}

#[test]
fn quitting_tells_the_others() {
    let mut sched = demo(SchedulerConfig::default());
    let kate = login(&mut sched, "kate", "f");
    let max = login(&mut sched, "max", "m");
    kate.lines();

    kate.say(&mut sched, "quit");
    assert_eq!(kate.lines(), ["Goodbye."]);
    assert_eq!(max.lines(), ["Kate leaves the game."]);
    assert_eq!(sched.connection_count(), 1);
    assert!(sched.game().world().find_living("kate").is_none());
}

#[test]
fn wizards_can_shut_the_game_down() {
    let game = quill_runtime::DemoGame::new().with_wizard("irmen", "pw");
    let mut sched = quill_runtime::scheduler(SchedulerConfig::default(), game, None);
    let kate = login(&mut sched, "kate", "f");

    kate.say(&mut sched, "shutdown");
    assert_eq!(kate.lines(), ["Only wizards may shut the game down."]);
    assert!(!sched.stop_handle().is_stopped());

    let wizard = crate::support::connect(&mut sched);
    for line in ["irmen", "pw", "m", "yes"] {
        wizard.say(&mut sched, line);
    }
    wizard.lines();
    kate.lines();
    wizard.say(&mut sched, "shutdown");
    assert_eq!(kate.lines(), ["The game is shutting down. Goodbye!"]);
    assert!(sched.stop_handle().is_stopped());
}
