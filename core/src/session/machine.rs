//! Session state machine.
//!
//! Drives a training session through its cycle sequence:
//! `idle → breathe(0) → hold(0) → breathe(1) → … → hold(n-1) → complete`.
//!
//! All session state lives here and is mutated only by the transition
//! methods below; consumers receive read-only snapshots. Invalid actions
//! (tap outside a tap-mode hold, resume from idle, start with no cycles)
//! are guarded no-ops rather than errors: an inconsistent timer state is
//! worse than a silently ignored spurious action.

use std::sync::Arc;
use std::time::Instant;

use apnea_types::{BreathCycle, CycleResult, TimerSettings};
use tokio::sync::mpsc;

use crate::announce::AnnouncementPolicy;
use crate::speech::{SpeechEvent, SpeechSender};

use super::clock::{ClockTick, PhaseClock, SystemTimeSource, TimeSource};
use super::state::{SessionPhase, SessionSnapshot, SessionState};

/// Events surfaced to the embedding layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Session reached `complete`; results are final and ready to persist.
    /// Fired on natural completion and on stop-with-save.
    Completed { results: Vec<CycleResult> },
}

/// The state machine driving a breath-hold training session.
pub struct SessionMachine {
    state: SessionState,
    /// Immutable snapshot of the cycle sequence, taken at session start
    cycles: Vec<BreathCycle>,
    clock: PhaseClock,
    policy: AnnouncementPolicy,
    settings: TimerSettings,
    speech: Option<SpeechSender>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
    time: Arc<dyn TimeSource>,
    /// Wall-clock capture at hold start; non-tap holds measure from this
    hold_started: Option<Instant>,
    /// Elapsed ticks in the current tap-mode hold
    tap_elapsed: u32,
}

impl SessionMachine {
    pub fn new(settings: TimerSettings) -> Self {
        let policy = AnnouncementPolicy::new(&settings);
        Self {
            state: SessionState::default(),
            cycles: Vec::new(),
            clock: PhaseClock::new(),
            policy,
            settings,
            speech: None,
            events: None,
            time: Arc::new(SystemTimeSource),
            hold_started: None,
            tap_elapsed: 0,
        }
    }

    /// Attach the speech channel. Announcements are fire-and-forget.
    pub fn with_speech(mut self, sender: SpeechSender) -> Self {
        self.speech = Some(sender);
        self
    }

    /// Attach the session event channel (completion auto-save requests).
    pub fn with_events(mut self, sender: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Replace the wall-clock source (tests drive time manually).
    pub fn with_time_source(mut self, time: Arc<dyn TimeSource>) -> Self {
        self.time = time;
        self
    }

    /// Replace the settings. Takes effect at the next phase transition or
    /// session start; the current phase's announcement state is untouched.
    pub fn set_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Start a session over the given cycle sequence.
    ///
    /// A no-op when `cycles` is empty. Resets all session state, enters the
    /// breathe phase of cycle 0, and clears any pending speech.
    pub fn start(&mut self, cycles: Vec<BreathCycle>) {
        if cycles.is_empty() {
            return;
        }

        self.cycles = cycles;
        self.state = SessionState::default();
        self.hold_started = None;
        self.tap_elapsed = 0;

        let first = self.cycles[0];
        self.state.phase = SessionPhase::Breathe;
        self.state.is_running = true;
        self.state.time_remaining = first.breathe_time;
        self.state.total_phase_time = first.breathe_time;
        self.state.is_tap_mode = first.tap_mode;

        self.clock.start_countdown(first.breathe_time);
        self.policy.reset(&self.settings);
        self.send_speech(SpeechEvent::Clear);
        self.announce("Breathe");

        tracing::debug!(cycles = self.cycles.len(), "session started");
    }

    /// Advance the session by one second.
    ///
    /// Within a tick the order is fixed: time update, progress update,
    /// announcement evaluation, then expiry handling.
    pub fn tick(&mut self) {
        if !self.state.is_running {
            return;
        }

        match self.clock.tick() {
            ClockTick::Idle => {}
            ClockTick::Running { time } => {
                self.state.time_remaining = time;
                self.state.progress = self.clock.progress();
                if self.clock.is_count_up() {
                    self.tap_elapsed = time;
                } else {
                    for text in self.policy.evaluate(time) {
                        self.announce(&text);
                    }
                }
            }
            ClockTick::Expired => {
                self.state.time_remaining = 0;
                self.state.progress = 100.0;
                self.on_phase_expired();
            }
        }
    }

    /// Manually end a tap-mode hold.
    ///
    /// No-op unless the session is in a running tap-mode hold. The recorded
    /// hold duration is the accumulated tick count, not wall-clock time.
    pub fn tap_end_hold(&mut self) {
        if self.state.phase != SessionPhase::Hold || !self.state.is_tap_mode || !self.state.is_running
        {
            return;
        }
        self.record_hold_result();
        self.advance_cycle();
    }

    /// Suspend ticking. Idempotent; only meaningful while breathe/hold.
    pub fn pause(&mut self) {
        if !self.state.phase.is_active() || !self.state.is_running {
            return;
        }
        self.state.is_running = false;
        self.clock.pause();
        self.announce("Paused");
    }

    /// Continue from the exact state held at pause. No-op from idle/complete.
    pub fn resume(&mut self) {
        if !self.state.phase.is_active() || self.state.is_running {
            return;
        }
        self.state.is_running = true;
        self.clock.resume();
        self.announce("Resuming");
    }

    /// Stop the session.
    ///
    /// With `save_as_completed` and an active phase: a hold in progress is
    /// recorded with its elapsed time so far, then the session transitions
    /// to `complete` keeping accumulated results. Otherwise all results are
    /// discarded and the session resets to `idle`.
    pub fn stop(&mut self, save_as_completed: bool) {
        let was_active = self.state.phase.is_active();

        self.clock.stop();
        self.send_speech(SpeechEvent::Clear);

        if save_as_completed && was_active {
            if self.state.phase == SessionPhase::Hold {
                self.record_hold_result();
            }
            self.state.phase = SessionPhase::Complete;
            self.emit(SessionEvent::Completed {
                results: self.state.results.clone(),
            });
            self.announce("Training complete");
            tracing::debug!(results = self.state.results.len(), "session stopped with save");
        } else if !save_as_completed {
            self.state.phase = SessionPhase::Idle;
            self.state.current_cycle_index = 0;
            self.state.results.clear();
            tracing::debug!("session stopped, results discarded");
        }

        self.state.is_running = false;
        self.state.time_remaining = 0;
        self.state.progress = 0.0;
        self.state.is_tap_mode = false;
        self.tap_elapsed = 0;
        self.hold_started = None;
        self.policy.reset(&self.settings);
    }

    /// Read-only view for presentation layers.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.state.phase,
            current_cycle_index: self.state.current_cycle_index,
            time_remaining: self.state.time_remaining,
            total_phase_time: self.state.total_phase_time,
            is_running: self.state.is_running,
            progress: self.state.progress,
            total_cycles: self.cycles.len(),
            is_tap_mode: self.state.is_tap_mode,
            cycle_results: self.state.results.clone(),
        }
    }

    // ─── Transitions ────────────────────────────────────────────────────────

    fn on_phase_expired(&mut self) {
        match self.state.phase {
            SessionPhase::Breathe => self.enter_hold(),
            // tap-mode holds never expire; only countdown holds end here
            SessionPhase::Hold => {
                self.record_hold_result();
                self.advance_cycle();
            }
            SessionPhase::Idle | SessionPhase::Complete => {}
        }
    }

    fn enter_hold(&mut self) {
        let cycle = self.cycles[self.state.current_cycle_index];

        self.state.phase = SessionPhase::Hold;
        self.state.total_phase_time = cycle.hold_time;
        self.state.progress = 0.0;
        self.state.is_tap_mode = cycle.tap_mode;
        self.policy.reset(&self.settings);
        self.hold_started = Some(self.time.now());

        if cycle.tap_mode {
            self.tap_elapsed = 0;
            self.state.time_remaining = 0;
            self.clock.start_count_up();
            self.announce("Hold your breath. Tap when you need to breathe.");
        } else {
            self.state.time_remaining = cycle.hold_time;
            self.clock.start_countdown(cycle.hold_time);
            self.announce("Hold your breath");
        }
    }

    /// Record the result for the in-progress hold. Tap-mode holds use the
    /// accumulated tick count; timed holds use the wall-clock delta since
    /// hold start so the measurement tolerates missed ticks.
    fn record_hold_result(&mut self) {
        let Some(cycle) = self.cycles.get(self.state.current_cycle_index).copied() else {
            return;
        };

        let actual_hold_time = if self.state.is_tap_mode {
            self.tap_elapsed
        } else {
            self.hold_started
                .map(|started| {
                    self.time.now().duration_since(started).as_secs_f64().round() as u32
                })
                .unwrap_or(0)
        };

        self.state.results.push(CycleResult {
            cycle_index: self.state.current_cycle_index,
            breathe_time: cycle.breathe_time,
            hold_time: cycle.hold_time,
            actual_hold_time,
            was_tap_mode: self.state.is_tap_mode,
        });
    }

    fn advance_cycle(&mut self) {
        let next = self.state.current_cycle_index + 1;
        if next >= self.cycles.len() {
            self.complete();
            return;
        }

        let cycle = self.cycles[next];
        self.state.current_cycle_index = next;
        self.state.phase = SessionPhase::Breathe;
        self.state.time_remaining = cycle.breathe_time;
        self.state.total_phase_time = cycle.breathe_time;
        self.state.progress = 0.0;
        self.state.is_tap_mode = cycle.tap_mode;
        self.hold_started = None;
        self.tap_elapsed = 0;

        self.clock.start_countdown(cycle.breathe_time);
        self.policy.reset(&self.settings);
        self.announce("Breathe");
    }

    fn complete(&mut self) {
        self.state.phase = SessionPhase::Complete;
        self.state.is_running = false;
        self.state.is_tap_mode = false;
        self.clock.stop();
        self.policy.reset(&self.settings);
        self.announce("Training complete");
        self.emit(SessionEvent::Completed {
            results: self.state.results.clone(),
        });

        tracing::debug!(results = self.state.results.len(), "session complete");
    }

    // ─── Outputs ────────────────────────────────────────────────────────────

    fn announce(&self, text: &str) {
        self.send_speech(SpeechEvent::Say {
            text: text.to_string(),
        });
    }

    fn send_speech(&self, event: SpeechEvent) {
        if let Some(ref sender) = self.speech {
            // a full channel drops the event rather than stalling a tick
            if let Err(err) = sender.try_send(event) {
                tracing::debug!(error = %err, "speech event dropped");
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(ref sender) = self.events {
            let _ = sender.send(event);
        }
    }
}
