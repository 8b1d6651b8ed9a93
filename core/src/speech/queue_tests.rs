//! Tests for the utterance queue.

use super::queue::SpeechQueue;

#[test]
fn drains_in_fifo_order() {
    let mut queue = SpeechQueue::new();
    assert!(queue.enqueue("Breathe"));
    assert!(queue.enqueue("5"));
    assert!(queue.enqueue("4"));

    assert_eq!(queue.next().as_deref(), Some("Breathe"));
    queue.finish();
    assert_eq!(queue.next().as_deref(), Some("5"));
    queue.finish();
    assert_eq!(queue.next().as_deref(), Some("4"));
    queue.finish();
    assert!(queue.next().is_none());
    assert!(queue.is_idle());
}

#[test]
fn duplicate_pending_text_is_suppressed() {
    let mut queue = SpeechQueue::new();
    assert!(queue.enqueue("Paused"));
    assert!(!queue.enqueue("Paused"));
    assert_eq!(queue.pending_len(), 1);
}

#[test]
fn duplicate_of_in_flight_text_is_suppressed() {
    let mut queue = SpeechQueue::new();
    queue.enqueue("Hold your breath");
    assert_eq!(queue.next().as_deref(), Some("Hold your breath"));

    assert!(!queue.enqueue("Hold your breath"));
    queue.finish();

    // once finished, the same text may be spoken again
    assert!(queue.enqueue("Hold your breath"));
}

#[test]
fn only_one_utterance_in_flight_at_a_time() {
    let mut queue = SpeechQueue::new();
    queue.enqueue("3");
    queue.enqueue("2");

    assert!(queue.next().is_some());
    assert!(queue.next().is_none(), "next() while speaking must yield nothing");
    queue.finish();
    assert_eq!(queue.next().as_deref(), Some("2"));
}

#[test]
fn clear_drops_pending_but_not_in_flight() {
    let mut queue = SpeechQueue::new();
    queue.enqueue("Breathe");
    queue.enqueue("5");
    let speaking = queue.next();
    assert_eq!(speaking.as_deref(), Some("Breathe"));

    queue.clear();
    assert_eq!(queue.pending_len(), 0);
    assert!(!queue.is_idle(), "in-flight utterance finishes on its own");

    queue.finish();
    assert!(queue.next().is_none());
}
