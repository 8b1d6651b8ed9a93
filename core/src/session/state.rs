//! Session phase and state types.

use apnea_types::CycleResult;
use serde::{Deserialize, Serialize};

/// Phase of a training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No session running
    #[default]
    Idle,
    /// Breathe-up phase of the current cycle
    Breathe,
    /// Hold phase of the current cycle
    Hold,
    /// All cycles finished, or the session was stopped with save
    Complete,
}

impl SessionPhase {
    /// Whether the session is in an active timed phase.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionPhase::Breathe | SessionPhase::Hold)
    }
}

/// Mutable session state.
///
/// Owned and mutated exclusively by [`super::SessionMachine`]; every other
/// component sees it only through [`SessionSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// Index into the active cycle sequence while phase is breathe/hold
    pub current_cycle_index: usize,
    /// Remaining seconds for countdown phases; elapsed seconds for tap-mode holds
    pub time_remaining: u32,
    /// Planned duration of the current phase (progress denominator)
    pub total_phase_time: u32,
    pub is_running: bool,
    /// 0-100, only meaningful for countdown phases
    pub progress: f32,
    /// Mirrors the current cycle's tap flag while active, false otherwise
    pub is_tap_mode: bool,
    /// Append-only within a session, reset at session start
    pub results: Vec<CycleResult>,
}

/// Read-only view of the session handed to presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_cycle_index: usize,
    pub time_remaining: u32,
    pub total_phase_time: u32,
    pub is_running: bool,
    pub progress: f32,
    pub total_cycles: usize,
    pub is_tap_mode: bool,
    pub cycle_results: Vec<CycleResult>,
}
