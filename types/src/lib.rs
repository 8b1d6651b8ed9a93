//! Shared data types for APNEA
//!
//! This crate contains the serializable types exchanged between the core
//! engine (apnea-core), storage, and front ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Training tables
// ─────────────────────────────────────────────────────────────────────────────

/// One breathe + hold pair in a training table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathCycle {
    /// Breathe-up duration in seconds
    pub breathe_time: u32,
    /// Hold duration in seconds. When `tap_mode` is set this is only a
    /// planning estimate; the actual hold ends on a manual tap.
    pub hold_time: u32,
    /// Tap-mode hold: time counts up and the phase ends on a manual tap
    #[serde(default)]
    pub tap_mode: bool,
}

/// A named, ordered sequence of breath cycles.
///
/// Immutable for the duration of a session: the engine takes a snapshot of
/// the cycles at session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingTable {
    pub id: String,
    pub name: String,
    pub cycles: Vec<BreathCycle>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Session results
// ─────────────────────────────────────────────────────────────────────────────

/// Recorded outcome of one cycle's hold phase.
///
/// Created exactly once per cycle, when the hold ends by expiry, by a manual
/// tap, or at an early stop-with-save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleResult {
    pub cycle_index: usize,
    pub breathe_time: u32,
    /// Planned hold duration
    pub hold_time: u32,
    /// Measured hold duration
    pub actual_hold_time: u32,
    #[serde(default)]
    pub was_tap_mode: bool,
}

/// A completed training session, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeRecord {
    pub table_id: String,
    pub table_name: String,
    pub completed_at: DateTime<Utc>,
    pub results: Vec<CycleResult>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Announcement and voice settings for the session timer.
///
/// Changes take effect at the next session start; the engine snapshots the
/// settings at each phase transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Seconds before phase end at which the continuous countdown begins (0-20)
    #[serde(default = "default_countdown_start")]
    pub countdown_start: u32,
    /// Announce every remaining second once at or below `countdown_start`
    #[serde(default = "default_true")]
    pub use_continuous_countdown: bool,
    /// Announce the marks configured in `announce_times`
    #[serde(default)]
    pub use_specific_announcements: bool,
    /// Remaining-time marks to announce, in seconds (1-600 each)
    #[serde(default = "default_announce_times")]
    pub announce_times: Vec<u32>,
    /// Speech volume, 0.0-1.0
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_countdown_start() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_announce_times() -> Vec<u32> {
    vec![60, 30, 20, 10, 5]
}

fn default_volume() -> f32 {
    0.7
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            countdown_start: default_countdown_start(),
            use_continuous_countdown: true,
            use_specific_announcements: false,
            announce_times: default_announce_times(),
            volume: default_volume(),
        }
    }
}

impl TimerSettings {
    /// Clamp all fields into their valid ranges.
    ///
    /// Applied after loading from disk so a hand-edited config file cannot
    /// put the engine into an out-of-range state.
    pub fn clamped(mut self) -> Self {
        self.countdown_start = self.countdown_start.min(20);
        self.volume = self.volume.clamp(0.0, 1.0);
        self.announce_times.retain(|&t| (1..=600).contains(&t));
        self.announce_times.sort_unstable();
        self.announce_times.dedup();
        self
    }
}
