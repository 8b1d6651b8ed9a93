//! Tests for the speech service loop.

use std::sync::{Arc, Mutex};

use super::error::SpeechError;
use super::events::SpeechEvent;
use super::service::{SpeechService, SpeechSink, create_speech_channel};

/// Sink that records every utterance it receives.
struct RecordingSink {
    spoken: Arc<Mutex<Vec<(String, f32)>>>,
    /// Texts this sink fails on (failures must not stall the queue)
    fail_on: Vec<String>,
}

impl RecordingSink {
    fn new(spoken: Arc<Mutex<Vec<(String, f32)>>>) -> Self {
        Self {
            spoken,
            fail_on: Vec::new(),
        }
    }
}

impl SpeechSink for RecordingSink {
    fn speak(&mut self, text: &str, volume: f32) -> Result<(), SpeechError> {
        if self.fail_on.iter().any(|t| t == text) {
            return Err(SpeechError::Synthesis("engine hiccup".to_string()));
        }
        self.spoken
            .lock()
            .expect("sink mutex poisoned")
            .push((text.to_string(), volume));
        Ok(())
    }
}

#[tokio::test]
async fn speaks_events_in_order_at_configured_volume() {
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let (tx, rx) = create_speech_channel();
    let service = SpeechService::new(rx, Box::new(RecordingSink::new(Arc::clone(&spoken))), 0.7);

    for text in ["Breathe", "5", "4"] {
        tx.send(SpeechEvent::Say {
            text: text.to_string(),
        })
        .await
        .expect("service alive");
    }
    drop(tx);
    service.run().await;

    let spoken = spoken.lock().expect("sink mutex poisoned");
    let texts: Vec<&str> = spoken.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(texts, vec!["Breathe", "5", "4"]);
    assert!(spoken.iter().all(|&(_, v)| (v - 0.7).abs() < f32::EPSILON));
}

#[tokio::test]
async fn failed_utterance_does_not_block_the_next() {
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let mut sink = RecordingSink::new(Arc::clone(&spoken));
    sink.fail_on = vec!["3".to_string()];

    let (tx, rx) = create_speech_channel();
    let service = SpeechService::new(rx, Box::new(sink), 1.0);

    for text in ["3", "2", "1"] {
        tx.send(SpeechEvent::Say {
            text: text.to_string(),
        })
        .await
        .expect("service alive");
    }
    drop(tx);
    service.run().await;

    let spoken = spoken.lock().expect("sink mutex poisoned");
    let texts: Vec<&str> = spoken.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(texts, vec!["2", "1"]);
}

#[tokio::test]
async fn clear_drops_utterances_still_buffered_in_the_channel() {
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let (tx, rx) = create_speech_channel();
    let service = SpeechService::new(rx, Box::new(RecordingSink::new(Arc::clone(&spoken))), 0.7);

    // a stop arrives while countdown announcements are still queued up
    for text in ["5", "4", "3"] {
        tx.send(SpeechEvent::Say {
            text: text.to_string(),
        })
        .await
        .expect("service alive");
    }
    tx.send(SpeechEvent::Clear).await.expect("service alive");
    drop(tx);
    service.run().await;

    let spoken = spoken.lock().expect("sink mutex poisoned");
    let texts: Vec<&str> = spoken.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(
        texts,
        vec!["5"],
        "only the utterance already in flight may be spoken after a clear"
    );
}

#[tokio::test]
async fn set_volume_applies_to_subsequent_utterances() {
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let (tx, rx) = create_speech_channel();
    let service = SpeechService::new(rx, Box::new(RecordingSink::new(Arc::clone(&spoken))), 0.5);

    tx.send(SpeechEvent::Say {
        text: "Breathe".to_string(),
    })
    .await
    .expect("service alive");
    tx.send(SpeechEvent::SetVolume { volume: 1.0 })
        .await
        .expect("service alive");
    tx.send(SpeechEvent::Say {
        text: "Hold your breath".to_string(),
    })
    .await
    .expect("service alive");
    drop(tx);
    service.run().await;

    let spoken = spoken.lock().expect("sink mutex poisoned");
    assert!((spoken[0].1 - 0.5).abs() < f32::EPSILON);
    assert!((spoken[1].1 - 1.0).abs() < f32::EPSILON);
}
