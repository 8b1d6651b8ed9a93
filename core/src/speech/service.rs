//! Speech playback service using platform TTS
//!
//! Runs in a background task, receiving [`SpeechEvent`]s via channel and
//! draining the utterance queue against a [`SpeechSink`]. The `tts` crate
//! backs the sink on Windows/macOS; Linux shells out to espeak. The sink
//! call runs on the blocking thread pool, so the event loop keeps receiving
//! while an utterance is in flight and a `Clear` can drop everything still
//! pending.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::error::SpeechError;
use super::events::SpeechEvent;
use super::queue::SpeechQueue;

/// External single-voice speech capability.
///
/// Implementations either speak the utterance to completion before
/// returning (espeak) or hand it to an engine that serializes utterances
/// internally (the `tts` crate). `speak` is called from the blocking thread
/// pool, so blocking for the utterance duration is fine. Failures are
/// non-fatal.
pub trait SpeechSink: Send {
    fn speak(&mut self, text: &str, volume: f32) -> Result<(), SpeechError>;
}

/// TTS-backed sink. On Windows/macOS a failed engine init leaves the sink
/// permanently unavailable rather than erroring the session.
pub struct TtsSink {
    #[cfg(not(target_os = "linux"))]
    tts: Option<tts::Tts>,
}

impl TtsSink {
    pub fn new() -> Self {
        #[cfg(not(target_os = "linux"))]
        {
            let tts = match tts::Tts::default() {
                Ok(mut engine) => {
                    let _ = engine.set_rate(engine.normal_rate());
                    Some(engine)
                }
                Err(_) => None,
            };
            Self { tts }
        }

        #[cfg(target_os = "linux")]
        {
            Self {}
        }
    }
}

impl Default for TtsSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "linux"))]
impl SpeechSink for TtsSink {
    fn speak(&mut self, text: &str, volume: f32) -> Result<(), SpeechError> {
        let Some(ref mut tts) = self.tts else {
            return Err(SpeechError::Unavailable);
        };
        let _ = tts.set_volume(volume.clamp(0.0, 1.0));
        tts.speak(text, false)
            .map(|_| ())
            .map_err(|e| SpeechError::Synthesis(e.to_string()))
    }
}

#[cfg(target_os = "linux")]
impl SpeechSink for TtsSink {
    fn speak(&mut self, text: &str, volume: f32) -> Result<(), SpeechError> {
        use std::process::Command;

        // espeak amplitude range is 0-200, default 100
        let amplitude = (volume.clamp(0.0, 1.0) * 200.0) as u32;
        Command::new("espeak")
            .arg("-a")
            .arg(amplitude.to_string())
            .arg(text)
            .output()
            .map(|_| ())
            .map_err(|e| SpeechError::Synthesis(e.to_string()))
    }
}

/// Speech service that drains the utterance queue against a sink.
pub struct SpeechService {
    event_rx: mpsc::Receiver<SpeechEvent>,
    sink: Box<dyn SpeechSink>,
    queue: SpeechQueue,
    volume: f32,
}

impl SpeechService {
    pub fn new(event_rx: mpsc::Receiver<SpeechEvent>, sink: Box<dyn SpeechSink>, volume: f32) -> Self {
        Self {
            event_rx,
            sink,
            queue: SpeechQueue::new(),
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Run the speech service (async loop, ends when all senders drop and
    /// the queue is drained).
    ///
    /// One utterance at a time is handed to the sink on the blocking thread
    /// pool; the sink travels with the task and comes back when it finishes.
    /// Event handling is biased over completion handling, so control events
    /// already buffered in the channel land before the next utterance starts.
    /// A failed utterance is logged and the next one is attempted; there is
    /// no retry.
    pub async fn run(mut self) {
        let mut sink = Some(self.sink);
        let mut in_flight: Option<JoinHandle<Box<dyn SpeechSink>>> = None;
        let mut closed = false;

        loop {
            if in_flight.is_none() {
                match self.queue.next() {
                    Some(text) => {
                        let Some(mut taken) = sink.take() else {
                            return;
                        };
                        let volume = self.volume;
                        in_flight = Some(tokio::task::spawn_blocking(move || {
                            if let Err(err) = taken.speak(&text, volume) {
                                tracing::debug!(text = %text, error = %err, "speech synthesis failed");
                            }
                            taken
                        }));
                    }
                    None if closed => break,
                    None => {}
                }
            }

            tokio::select! {
                biased;

                event = self.event_rx.recv(), if !closed => {
                    match event {
                        Some(SpeechEvent::Say { text }) => {
                            self.queue.enqueue(text);
                        }
                        Some(SpeechEvent::Clear) => self.queue.clear(),
                        Some(SpeechEvent::SetVolume { volume }) => {
                            self.volume = volume.clamp(0.0, 1.0);
                        }
                        None => closed = true,
                    }
                }

                joined = join_in_flight(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    self.queue.finish();
                    match joined {
                        Ok(returned) => sink = Some(returned),
                        Err(err) => {
                            tracing::warn!(error = %err, "speech task failed");
                            return;
                        }
                    }
                }
            }
        }
    }
}

/// Await the in-flight utterance task. Pends forever on `None`; the select
/// guard keeps this branch disabled in that case.
async fn join_in_flight(
    in_flight: &mut Option<JoinHandle<Box<dyn SpeechSink>>>,
) -> Result<Box<dyn SpeechSink>, tokio::task::JoinError> {
    match in_flight.as_mut() {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

/// Sender handle for speech events.
pub type SpeechSender = mpsc::Sender<SpeechEvent>;

/// Create a new speech event channel.
pub fn create_speech_channel() -> (SpeechSender, mpsc::Receiver<SpeechEvent>) {
    // buffer size of 64 should be plenty for announcements
    mpsc::channel(64)
}
