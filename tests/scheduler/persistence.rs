//! Snapshots: what a restored scheduler does next.

use chrono::TimeDelta;
use quill_engine::SchedulerConfig;
use quill_foundation::Value;
use quill_runtime::{from_bytes, to_bytes};

use crate::harness::{entity, scheduler};

fn busy_scheduler() -> quill_engine::TurnScheduler<crate::harness::Recorder> {
    let mut sched = scheduler(SchedulerConfig::default().with_time_factor(10.0));
    sched.with_context(|_, ctx| {
        let now = ctx.now();
        for (secs, tag) in [(40, 1), (10, 2), (10, 3), (25, 4), (90, 5)] {
            ctx.defer(now + TimeDelta::seconds(secs), entity(1), "record", vec![Value::Int(tag)]);
        }
        ctx.defer(now + TimeDelta::seconds(5), entity(2), "countdown", vec![Value::Int(3)]);
        ctx.register_periodic(entity(7));
    });
    sched.step(true).unwrap();
    sched
}

#[test]
fn restored_scheduler_fires_the_same_way() {
    let mut original = busy_scheduler();
    let bytes = to_bytes(&original.snapshot()).unwrap();

    let mut restored = scheduler(SchedulerConfig::default().with_time_factor(10.0));
    restored.restore(from_bytes(&bytes).unwrap());
    assert_eq!(restored.clock().now(), original.clock().now());
    assert_eq!(restored.periodic(), [entity(7)]);

    let already = original.game().fired.len();
    for _ in 0..10 {
        original.step(true).unwrap();
        restored.step(true).unwrap();
    }
    assert_eq!(original.game().fired[already..], restored.game().fired[..]);
    assert_eq!(original.game().beats.len(), restored.game().beats.len() + 1);
    assert_eq!(restored.clock().now(), original.clock().now());
}

#[test]
fn new_deferreds_queue_behind_restored_ones() {
    let original = busy_scheduler();
    let snapshot = original.snapshot();
    let last_seq = snapshot.deferreds.iter().map(|d| d.seq).max().unwrap();

    let mut restored = scheduler(SchedulerConfig::default());
    restored.restore(snapshot.clone());
    let due = snapshot.deferreds.iter().map(|d| d.due).min().unwrap();
    restored.with_context(|_, ctx| {
        ctx.defer(due, entity(3), "other", vec![Value::Int(99)]);
    });

    let pending = restored.deferreds().snapshot();
    let added = pending.iter().find(|d| d.action == "other").unwrap();
    assert!(added.seq > last_seq);

    restored.step(true).unwrap();
    let fired = &restored.game().fired;
    assert!(fired.len() >= 2, "{fired:?}");
    assert_eq!(fired.last().map(|(a, _)| a.as_str()), Some("other"));
}

#[test]
fn snapshot_survives_a_file() {
    let sched = busy_scheduler();
    let snapshot = sched.snapshot();
    let path = std::env::temp_dir().join(format!("quill-scheduler-test-{}.qs", std::process::id()));
    quill_runtime::save_snapshot(&snapshot, &path).unwrap();
    let loaded = quill_runtime::load_snapshot(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, snapshot);
}
