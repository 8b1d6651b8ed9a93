//! Speech event types for session engine integration.

/// Events consumed by the speech service task.
#[derive(Debug, Clone)]
pub enum SpeechEvent {
    /// Queue an utterance. Duplicates of a pending or in-flight utterance
    /// are dropped.
    Say { text: String },

    /// Drop all queued utterances (session stopped or restarted).
    Clear,

    /// Change playback volume for subsequent utterances.
    SetVolume { volume: f32 },
}
