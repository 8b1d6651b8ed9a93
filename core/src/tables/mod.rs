//! Training table storage
//!
//! Tables are TOML files in the user config directory, one table per file,
//! named `{id}.toml`. Loading a table yields the immutable cycle snapshot
//! handed to the session machine at start.

mod error;
mod loader;


pub use error::TableError;
pub use loader::{
    MAX_PHASE_SECS, delete_table, load_table_file, load_tables, load_tables_from_dir, save_table,
    save_table_in, tables_dir, validate_cycle,
};
