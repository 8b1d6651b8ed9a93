//! Session engine
//!
//! This module provides:
//! - **Phase clock**: one-second-tick countdown/count-up bound to the current phase
//! - **State machine**: drives a session through breathe/hold cycles and
//!   records per-cycle results
//! - **Driver**: wall-clock tick scheduling for live sessions
//!
//! The machine itself is synchronous and tick-driven. Only the driver touches
//! real time, so tests advance sessions by calling `tick` directly instead of
//! waiting on the wall clock.

mod clock;
mod driver;
mod machine;
mod state;

#[cfg(test)]
mod clock_tests;

pub use clock::{ClockTick, PhaseClock, SystemTimeSource, TimeSource};
pub use driver::{MachineHandle, SessionDriver};
pub use machine::{SessionEvent, SessionMachine};
pub use state::{SessionPhase, SessionSnapshot, SessionState};
