//! SQLite persistence for the note collection.

mod repository;
mod schema;
mod sqlite;

pub use repository::{NoteRepository, StorageError, StorageResult};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{SqliteStore, Transaction};

/// Database file name inside the data directory.
pub const DB_FILE: &str = "notekeep.db";
