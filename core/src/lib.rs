pub mod announce;
pub mod config;
pub mod records;
pub mod session;
pub mod speech;
pub mod tables;

// Re-exports for convenience
pub use announce::{AnnouncementPolicy, format_time, format_time_to_words};
pub use config::{ConfigError, load_settings, save_settings};
pub use records::{RecordError, load_records, save_record};
pub use session::{
    MachineHandle, PhaseClock, SessionDriver, SessionEvent, SessionMachine, SessionPhase,
    SessionSnapshot, TimeSource,
};
pub use speech::{
    SpeechEvent, SpeechQueue, SpeechSender, SpeechService, SpeechSink, TtsSink,
    create_speech_channel,
};
pub use tables::{TableError, load_tables, save_table, tables_dir, validate_cycle};
