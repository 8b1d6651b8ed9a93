//! Error types for speech synthesis.

use thiserror::Error;

/// Errors from the external speech capability. Always non-fatal: the
/// service logs them and proceeds to the next queued utterance.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech engine unavailable")]
    Unavailable,

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}
