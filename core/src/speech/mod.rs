//! Speech subsystem
//!
//! Serializes announcement requests against a single-voice speech
//! capability:
//! - **Queue**: FIFO with duplicate suppression, one utterance at a time
//! - **Service**: background task receiving [`SpeechEvent`]s via channel
//!   and draining the queue against the platform TTS engine
//!
//! The subsystem is decoupled from session timing; phase transitions never
//! wait on speech, and a missing or failing engine leaves the session fully
//! usable but silent.

mod error;
mod events;
mod queue;
mod service;

#[cfg(test)]
mod queue_tests;
#[cfg(test)]
mod service_tests;

pub use error::SpeechError;
pub use events::SpeechEvent;
pub use queue::SpeechQueue;
pub use service::{SpeechSender, SpeechService, SpeechSink, TtsSink, create_speech_channel};
