//! Saving the game and picking it up again.

use std::path::PathBuf;

use quill_engine::SchedulerConfig;
use quill_runtime::{DemoGame, actions, load_snapshot, scheduler};

use crate::support::{demo, login};

fn save_file(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("quill-{tag}-{}.qs", std::process::id()))
}

#[test]
fn save_needs_a_save_file() {
    let mut sched = demo(SchedulerConfig::default());
    let kate = login(&mut sched, "kate", "f");
    kate.say(&mut sched, "save");
    assert_eq!(kate.lines(), ["It is not possible to save your progress."]);
}

#[test]
fn saved_games_resume_where_they_left_off() {
    let path = save_file("resume");
    let config = SchedulerConfig::default().with_time_factor(30.0);
    let game = DemoGame::new().with_save_path(&path);
    let mut sched = scheduler(config.clone(), game, None);
    let kate = login(&mut sched, "kate", "f");
    for _ in 0..3 {
        sched.step(true).unwrap();
    }
    kate.lines();

    kate.say(&mut sched, "save");
    assert_eq!(kate.lines(), ["Game saved.", "Game time: 1970-01-01 00:01:30"]);
    let snapshot = load_snapshot(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let cat = sched.game().landmarks().cat;
    assert!(snapshot.deferreds.iter().any(|d| d.owner == cat && d.action == actions::CAT_PURR));
    assert_eq!(snapshot.periodic, [sched.game().landmarks().clock]);

    let mut restored = scheduler(config, DemoGame::new(), Some(snapshot));
    assert_eq!(restored.clock().now(), sched.clock().now());
    assert_eq!(restored.deferreds().snapshot(), sched.deferreds().snapshot());
    assert_eq!(restored.game().landmarks().cat, cat);

    // A fresh player in the restored house hears the cat on schedule.
    let max = login(&mut restored, "max", "m");
    let mut heard = Vec::new();
    for _ in 0..40 {
        restored.step(true).unwrap();
        heard.extend(max.lines());
    }
    assert!(heard.iter().any(|l| l.starts_with("Garfield ")), "{heard:?}");
}
