//! Idle eviction.

use std::time::Duration;

use quill_engine::{Control, Mode, Role, SchedulerConfig};

use crate::harness::{connect, drain, entity, scheduler};

fn impatient(mode: Mode) -> SchedulerConfig {
    SchedulerConfig::default()
        .with_mode(mode)
        .with_idle_timeouts(Duration::ZERO, Duration::from_secs(3600))
}

#[test]
fn idle_players_are_logged_out_in_multi_actor_mode() {
    let mut sched = scheduler(impatient(Mode::MultiActor));
    let (id, _input, output) = connect(&mut sched);

    sched.step(false).unwrap();
    assert_eq!(sched.connection_count(), 0);
    assert_eq!(
        drain(&output),
        ["Automatic logout: You have been logged out because you've been idle for too long (0 minutes)."]
    );
    assert_eq!(sched.game().left, [id]);
}

#[test]
fn wizards_get_a_longer_leash() {
    let mut sched = scheduler(impatient(Mode::MultiActor));
    let (wizard, _w_in, _w_out) = connect(&mut sched);
    let (_player, _p_in, _p_out) = connect(&mut sched);
    sched.with_context(|_, ctx| {
        ctx.request(Control::Bind {
            conn: wizard,
            actor: entity(1),
            role: Role::Wizard,
        });
    });
    assert_eq!(sched.connection(wizard).map(|c| c.role()), Some(Role::Wizard));

    sched.step(false).unwrap();
    assert_eq!(sched.connection_count(), 1);
    assert!(sched.connection(wizard).is_some());
}

#[test]
fn single_actor_sessions_never_time_out() {
    let mut sched = scheduler(impatient(Mode::SingleActor));
    let (_, _input, _output) = connect(&mut sched);
    sched.step(false).unwrap();
    sched.step(true).unwrap();
    assert_eq!(sched.connection_count(), 1);
}
