pub mod commands;
pub mod context;
pub mod repl;

pub use context::CliContext;
pub use repl::{notify, readline};
