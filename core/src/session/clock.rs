//! Phase clock (runtime state)
//!
//! A `PhaseClock` tracks time for exactly one phase instance: countdown
//! phases tick from the planned duration toward zero and report expiry
//! exactly once; tap-mode holds count up from zero and never expire on
//! their own.
//!
//! # Lifecycle
//!
//! 1. Phase begins → `start_countdown` / `start_count_up`
//! 2. One `tick` per wall-clock second while running
//! 3. Countdown reaches zero → single `Expired` tick → machine transitions

use std::time::Instant;

/// Injectable wall-clock source.
///
/// Non-tap hold durations are measured from captured timestamps rather than
/// tick counts, so the measurement stays correct when ticks are missed. The
/// trait lets tests drive that clock synchronously.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic system clock used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Direction of the current phase's time tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockMode {
    Countdown,
    CountUp,
}

/// Outcome of advancing the clock by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Clock is stopped, paused, or already expired; nothing happened
    Idle,
    /// Phase still in progress. For countdown phases `time` is the remaining
    /// seconds; for count-up phases it is the elapsed seconds.
    Running { time: u32 },
    /// Countdown reached zero on this tick (reported exactly once per phase)
    Expired,
}

/// Countdown/count-up timer for a single phase instance.
#[derive(Debug)]
pub struct PhaseClock {
    mode: ClockMode,
    /// Planned phase duration (countdown only)
    total: u32,
    /// Remaining seconds (countdown) or elapsed seconds (count-up)
    time: u32,
    running: bool,
    expired: bool,
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseClock {
    /// A stopped clock. Ticks are ignored until a phase is started.
    pub fn new() -> Self {
        Self {
            mode: ClockMode::Countdown,
            total: 0,
            time: 0,
            running: false,
            expired: false,
        }
    }

    /// Begin a countdown phase of `total` seconds.
    pub fn start_countdown(&mut self, total: u32) {
        self.mode = ClockMode::Countdown;
        self.total = total;
        self.time = total;
        self.running = true;
        self.expired = false;
    }

    /// Begin a count-up phase (tap-mode hold). Never expires.
    pub fn start_count_up(&mut self) {
        self.mode = ClockMode::CountUp;
        self.total = 0;
        self.time = 0;
        self.running = true;
        self.expired = false;
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> ClockTick {
        if !self.running || self.expired {
            return ClockTick::Idle;
        }

        match self.mode {
            ClockMode::Countdown => {
                self.time = self.time.saturating_sub(1);
                if self.time == 0 {
                    self.expired = true;
                    ClockTick::Expired
                } else {
                    ClockTick::Running { time: self.time }
                }
            }
            ClockMode::CountUp => {
                self.time += 1;
                ClockTick::Running { time: self.time }
            }
        }
    }

    /// Suspend ticking. `time` is frozen exactly as it was.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Continue ticking from the value held at pause.
    pub fn resume(&mut self) {
        if !self.expired {
            self.running = true;
        }
    }

    /// Halt permanently for this phase instance.
    pub fn stop(&mut self) {
        self.running = false;
        self.expired = false;
        self.time = 0;
        self.total = 0;
    }

    pub fn time(&self) -> u32 {
        self.time
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_count_up(&self) -> bool {
        self.mode == ClockMode::CountUp
    }

    /// Fill percentage for countdown display (0.0 at phase start, 100.0 at
    /// expiry). Count-up phases have no meaningful progress and report 0.
    pub fn progress(&self) -> f32 {
        if self.mode == ClockMode::CountUp || self.total == 0 {
            return 0.0;
        }
        (((self.total - self.time) as f32 / self.total as f32) * 100.0).min(100.0)
    }
}
