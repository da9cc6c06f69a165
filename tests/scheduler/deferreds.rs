//! Deferred actions: ordering, ownership, rescheduling.

use std::time::Duration;

use chrono::TimeDelta;
use quill_engine::SchedulerConfig;
use quill_foundation::Value;

use crate::harness::{entity, scheduler};

#[test]
fn equal_due_times_fire_in_insertion_order() {
    let mut sched = scheduler(SchedulerConfig::default());
    sched.with_context(|_, ctx| {
        let due = ctx.now() + TimeDelta::milliseconds(500);
        for tag in 1..=4 {
            ctx.defer(due, entity(1), "record", vec![Value::Int(tag)]);
        }
        ctx.defer(due - TimeDelta::milliseconds(1), entity(2), "other", vec![Value::Int(0)]);
    });

    sched.step(true).unwrap();
    let fired: Vec<i64> = sched.game().fired.iter().map(|(_, tag)| *tag).collect();
    assert_eq!(fired, [0, 1, 2, 3, 4]);
    assert_eq!(sched.game().fired[0].0, "other");
}

#[test]
fn nothing_fires_before_its_time() {
    let mut sched = scheduler(SchedulerConfig::default());
    sched.with_context(|_, ctx| {
        ctx.defer_in(Duration::from_secs(3), entity(1), "record", vec![Value::Int(7)]);
    });

    sched.step(true).unwrap();
    sched.step(true).unwrap();
    assert!(sched.game().fired.is_empty());
    sched.step(true).unwrap();
    assert_eq!(sched.game().fired, [("record".to_string(), 7)]);
}

#[test]
fn removing_an_owner_cancels_only_its_actions() {
    let mut sched = scheduler(SchedulerConfig::default());
    let removed = sched.with_context(|_, ctx| {
        let now = ctx.now();
        ctx.defer(now, entity(1), "record", vec![Value::Int(1)]);
        ctx.defer(now, entity(2), "record", vec![Value::Int(2)]);
        ctx.defer(now, entity(1), "other", vec![Value::Int(3)]);
        ctx.remove_deferreds(entity(1))
    });
    assert_eq!(removed, 2);

    sched.step(true).unwrap();
    assert_eq!(sched.game().fired, [("record".to_string(), 2)]);
}

#[test]
fn actions_of_vanished_owners_are_skipped() {
    let mut sched = scheduler(SchedulerConfig::default());
    sched.game_mut().gone.push(entity(9));
    sched.with_context(|_, ctx| {
        let now = ctx.now();
        ctx.defer(now, entity(9), "record", vec![Value::Int(9)]);
        ctx.defer(now, quill_foundation::EntityId::null(), "record", vec![Value::Int(0)]);
    });

    sched.step(true).unwrap();
    assert_eq!(sched.game().fired, [("record".to_string(), 0)]);
    assert!(sched.deferreds().is_empty());
}

#[test]
fn handlers_can_reschedule_themselves() {
    let mut sched = scheduler(SchedulerConfig::default());
    sched.with_context(|_, ctx| {
        let due = ctx.now() + TimeDelta::seconds(1);
        ctx.defer(due, entity(1), "countdown", vec![Value::Int(2)]);
    });

    for _ in 0..5 {
        sched.step(true).unwrap();
    }
    let left: Vec<i64> = sched.game().fired.iter().map(|(_, n)| *n).collect();
    assert_eq!(left, [2, 1, 0]);
    assert!(sched.deferreds().is_empty());
}
