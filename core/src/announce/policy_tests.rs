//! Tests for announcement decisions and formatting.

use apnea_types::TimerSettings;

use super::format::{format_time, format_time_to_words};
use super::policy::AnnouncementPolicy;

fn settings(continuous: bool, specific: bool) -> TimerSettings {
    TimerSettings {
        countdown_start: 5,
        use_continuous_countdown: continuous,
        use_specific_announcements: specific,
        announce_times: vec![60, 30, 20, 10, 5],
        ..Default::default()
    }
}

#[test]
fn continuous_mode_announces_bare_numbers_below_threshold() {
    let mut policy = AnnouncementPolicy::new(&settings(true, false));

    assert!(policy.evaluate(6).is_empty());
    let mut announced = Vec::new();
    for remaining in (0..=5).rev() {
        announced.extend(policy.evaluate(remaining));
    }
    assert_eq!(announced, vec!["5", "4", "3", "2", "1"]);
}

#[test]
fn continuous_mode_never_repeats_a_value() {
    let mut policy = AnnouncementPolicy::new(&settings(true, false));

    assert_eq!(policy.evaluate(5), vec!["5"]);
    assert!(policy.evaluate(5).is_empty(), "re-evaluation at the same value");
    assert!(policy.evaluate(5).is_empty());
}

#[test]
fn specific_mode_announces_configured_marks_as_words() {
    let mut policy = AnnouncementPolicy::new(&settings(false, true));

    assert_eq!(policy.evaluate(60), vec!["1 minute"]);
    assert_eq!(policy.evaluate(30), vec!["30 seconds"]);
    assert!(policy.evaluate(45).is_empty(), "45 is not a configured mark");
    assert!(policy.evaluate(60).is_empty(), "mark already announced");
}

#[test]
fn both_modes_can_announce_the_same_value_independently() {
    let mut policy = AnnouncementPolicy::new(&settings(true, true));

    let texts = policy.evaluate(5);
    assert_eq!(texts, vec!["5".to_string(), "5 seconds".to_string()]);

    assert!(policy.evaluate(5).is_empty(), "each mode deduplicates itself");
}

#[test]
fn disabled_modes_stay_silent() {
    let mut policy = AnnouncementPolicy::new(&settings(false, false));
    for remaining in (1..=60).rev() {
        assert!(policy.evaluate(remaining).is_empty());
    }
}

#[test]
fn zero_remaining_is_never_announced() {
    let mut policy = AnnouncementPolicy::new(&settings(true, true));
    assert!(policy.evaluate(0).is_empty());
}

#[test]
fn reset_clears_dedup_state_and_resnapshots_settings() {
    let mut policy = AnnouncementPolicy::new(&settings(true, false));
    assert_eq!(policy.evaluate(3), vec!["3"]);

    // new phase: same value may be announced again
    policy.reset(&settings(true, false));
    assert_eq!(policy.evaluate(3), vec!["3"]);

    // settings changed between phases take effect on reset
    policy.reset(&settings(false, false));
    assert!(policy.evaluate(3).is_empty());
}

#[test]
fn words_formatting_covers_minute_and_second_boundaries() {
    assert_eq!(format_time_to_words(1), "1 second");
    assert_eq!(format_time_to_words(30), "30 seconds");
    assert_eq!(format_time_to_words(60), "1 minute");
    assert_eq!(format_time_to_words(61), "1 minute and 1 second");
    assert_eq!(format_time_to_words(65), "1 minute and 5 seconds");
    assert_eq!(format_time_to_words(120), "2 minutes");
    assert_eq!(format_time_to_words(150), "2 minutes and 30 seconds");
}

#[test]
fn clock_face_formatting_pads_to_two_digits() {
    assert_eq!(format_time(0), "00:00");
    assert_eq!(format_time(9), "00:09");
    assert_eq!(format_time(65), "01:05");
    assert_eq!(format_time(600), "10:00");
}
