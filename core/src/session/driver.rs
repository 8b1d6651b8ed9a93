//! Tick scheduling for live sessions.
//!
//! The machine is synchronous; this driver owns the one-tick-per-second
//! cadence. Manual actions and tick-driven transitions serialize on the
//! machine mutex, so only one transition executes at a time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::machine::SessionMachine;

/// Shared handle to the session machine.
pub type MachineHandle = Arc<Mutex<SessionMachine>>;

/// Drives a [`SessionMachine`] with one tick per wall-clock second.
pub struct SessionDriver {
    machine: MachineHandle,
    ticker: Option<JoinHandle<()>>,
}

impl SessionDriver {
    pub fn new(machine: MachineHandle) -> Self {
        Self {
            machine,
            ticker: None,
        }
    }

    /// Start the tick task, replacing any previous one.
    pub fn start(&mut self) {
        self.stop();

        let machine = Arc::clone(&self.machine);
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first interval tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                machine.lock().await.tick();
            }
        }));
    }

    /// Cancel the tick task. A tick already waiting on the interval is
    /// dropped, not delayed; the machine additionally ignores ticks while
    /// not running.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
