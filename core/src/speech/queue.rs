//! Utterance queue (runtime state)
//!
//! The external speech capability speaks one utterance at a time. Requests
//! matching a pending or in-flight utterance are dropped, so overlapping
//! announcement sources cannot stack repeats of the same text.

use std::collections::{HashSet, VecDeque};

/// FIFO queue of utterances with duplicate suppression.
#[derive(Debug, Default)]
pub struct SpeechQueue {
    pending: VecDeque<String>,
    queued: HashSet<String>,
    speaking: Option<String>,
}

impl SpeechQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an utterance. Returns `false` if it was suppressed as a
    /// duplicate of a pending or in-flight utterance.
    pub fn enqueue(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.speaking.as_deref() == Some(text.as_str()) || !self.queued.insert(text.clone()) {
            return false;
        }
        self.pending.push_back(text);
        true
    }

    /// Take the next utterance to speak, marking it in-flight. Returns
    /// `None` while an utterance is in flight or the queue is empty.
    pub fn next(&mut self) -> Option<String> {
        if self.speaking.is_some() {
            return None;
        }
        let text = self.pending.pop_front()?;
        self.queued.remove(&text);
        self.speaking = Some(text.clone());
        Some(text)
    }

    /// Mark the in-flight utterance finished, whether it succeeded or not.
    pub fn finish(&mut self) {
        self.speaking = None;
    }

    /// Drop all pending utterances. An utterance already in flight is left
    /// to finish on its own.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.queued.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.speaking.is_none() && self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
