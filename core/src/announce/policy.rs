//! Announcement decision logic.

use std::collections::HashSet;

use apnea_types::TimerSettings;

use super::format::format_time_to_words;

/// Maps a remaining time during a countdown phase to zero or more
/// announcement texts.
///
/// Two independently toggleable modes:
/// - continuous countdown: the bare number for every second at or below
///   `countdown_start`
/// - specific announcements: a spoken phrase for every configured mark
///
/// Each mode keeps its own per-phase dedup set, so a value already spoken
/// by one mode can still be spoken by the other, but never twice by the
/// same mode. The sets are cleared on every phase transition via [`reset`],
/// which also re-snapshots the settings.
///
/// [`reset`]: AnnouncementPolicy::reset
#[derive(Debug)]
pub struct AnnouncementPolicy {
    countdown_start: u32,
    use_continuous_countdown: bool,
    use_specific_announcements: bool,
    announce_times: HashSet<u32>,
    continuous_announced: HashSet<u32>,
    specific_announced: HashSet<u32>,
}

impl AnnouncementPolicy {
    pub fn new(settings: &TimerSettings) -> Self {
        Self {
            countdown_start: settings.countdown_start,
            use_continuous_countdown: settings.use_continuous_countdown,
            use_specific_announcements: settings.use_specific_announcements,
            announce_times: settings.announce_times.iter().copied().collect(),
            continuous_announced: HashSet::new(),
            specific_announced: HashSet::new(),
        }
    }

    /// Re-snapshot settings and clear the dedup state. Called at session
    /// start/stop and at every phase transition.
    pub fn reset(&mut self, settings: &TimerSettings) {
        *self = Self::new(settings);
    }

    /// Announcements for the given remaining time, continuous mode first.
    pub fn evaluate(&mut self, remaining: u32) -> Vec<String> {
        let mut texts = Vec::new();
        if remaining == 0 {
            return texts;
        }

        if self.use_continuous_countdown
            && remaining <= self.countdown_start
            && self.continuous_announced.insert(remaining)
        {
            texts.push(remaining.to_string());
        }

        if self.use_specific_announcements
            && self.announce_times.contains(&remaining)
            && self.specific_announced.insert(remaining)
        {
            texts.push(format_time_to_words(remaining));
        }

        texts
    }
}
