//! Practice record storage
//!
//! Each completed session is written as a TOML file in the user data
//! directory, named by completion timestamp. Saving is fire-and-forget from
//! the session's point of view: a failure is reported to the caller but the
//! completed results stay in memory.

mod error;
mod store;

#[cfg(test)]
mod store_tests;

pub use error::RecordError;
pub use store::{
    load_records, load_records_from, record_filename, records_dir, save_record, save_record_in,
};
