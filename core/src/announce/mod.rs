//! Countdown announcements
//!
//! Decides which spoken announcements a ticking countdown phase produces and
//! formats the announcement texts. Playback itself is the speech module's
//! concern; this module is pure decision logic.

mod format;
mod policy;

#[cfg(test)]
mod policy_tests;

pub use format::{format_time, format_time_to_words};
pub use policy::AnnouncementPolicy;
