//! Tests for the phase clock.

use super::clock::{ClockTick, PhaseClock};

#[test]
fn countdown_ticks_to_zero_and_expires_once() {
    let mut clock = PhaseClock::new();
    clock.start_countdown(3);

    assert_eq!(clock.tick(), ClockTick::Running { time: 2 });
    assert_eq!(clock.tick(), ClockTick::Running { time: 1 });
    assert_eq!(clock.tick(), ClockTick::Expired);

    // further ticks never re-fire expiry or go below zero
    assert_eq!(clock.tick(), ClockTick::Idle);
    assert_eq!(clock.tick(), ClockTick::Idle);
    assert_eq!(clock.time(), 0);
}

#[test]
fn count_up_never_expires() {
    let mut clock = PhaseClock::new();
    clock.start_count_up();

    for expected in 1..=120 {
        assert_eq!(clock.tick(), ClockTick::Running { time: expected });
    }
}

#[test]
fn paused_clock_ignores_ticks() {
    let mut clock = PhaseClock::new();
    clock.start_countdown(10);
    clock.tick();
    clock.pause();

    assert_eq!(clock.tick(), ClockTick::Idle);
    assert_eq!(clock.time(), 9, "pause must freeze the remaining time");

    clock.resume();
    assert_eq!(clock.tick(), ClockTick::Running { time: 8 });
}

#[test]
fn pause_resume_freezes_count_up_elapsed() {
    let mut clock = PhaseClock::new();
    clock.start_count_up();
    clock.tick();
    clock.tick();
    clock.pause();
    clock.tick();
    clock.resume();

    assert_eq!(clock.tick(), ClockTick::Running { time: 3 });
}

#[test]
fn stopped_clock_is_inert() {
    let mut clock = PhaseClock::new();
    clock.start_countdown(5);
    clock.tick();
    clock.stop();

    assert_eq!(clock.tick(), ClockTick::Idle);
    assert_eq!(clock.time(), 0);
    assert!(!clock.is_running());
}

#[test]
fn resume_after_expiry_does_not_restart() {
    let mut clock = PhaseClock::new();
    clock.start_countdown(1);
    assert_eq!(clock.tick(), ClockTick::Expired);

    clock.resume();
    assert_eq!(clock.tick(), ClockTick::Idle);
}

#[test]
fn progress_tracks_countdown_and_clamps() {
    let mut clock = PhaseClock::new();
    clock.start_countdown(4);
    assert_eq!(clock.progress(), 0.0);

    clock.tick();
    assert_eq!(clock.progress(), 25.0);

    clock.tick();
    clock.tick();
    clock.tick();
    assert_eq!(clock.progress(), 100.0);
}

#[test]
fn progress_is_zero_for_count_up() {
    let mut clock = PhaseClock::new();
    clock.start_count_up();
    clock.tick();
    clock.tick();
    assert_eq!(clock.progress(), 0.0);
}
