use std::sync::Arc;

use apnea_core::config;
use apnea_core::session::{MachineHandle, SessionDriver, SessionEvent, SessionMachine};
use apnea_core::speech::{SpeechSender, SpeechService, TtsSink, create_speech_channel};
use apnea_types::{TimerSettings, TrainingTable};
use tokio::sync::{Mutex, RwLock, mpsc};

/// Holds all shared state for the CLI application.
///
/// The session machine is the single owner of session state; commands go
/// through it under the mutex so manual actions serialize against the
/// driver's ticks.
pub struct CliContext {
    pub machine: MachineHandle,
    pub driver: Mutex<SessionDriver>,
    pub settings: RwLock<TimerSettings>,
    /// Table backing the running session; records are saved against it
    pub active_table: RwLock<Option<TrainingTable>>,
    pub speech: SpeechSender,
}

impl CliContext {
    /// Build the context, spawn the speech service, and return the session
    /// event stream for the auto-save listener.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let settings = config::load_settings();

        let (speech_tx, speech_rx) = create_speech_channel();
        tokio::spawn(
            SpeechService::new(speech_rx, Box::new(TtsSink::new()), settings.volume).run(),
        );

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let machine = SessionMachine::new(settings.clone())
            .with_speech(speech_tx.clone())
            .with_events(events_tx);
        let machine: MachineHandle = Arc::new(Mutex::new(machine));

        let ctx = Self {
            machine: Arc::clone(&machine),
            driver: Mutex::new(SessionDriver::new(machine)),
            settings: RwLock::new(settings),
            active_table: RwLock::new(None),
            speech: speech_tx,
        };
        (ctx, events_rx)
    }
}
