//! SQLite-backed note store.

mod connection;
mod repo_impl;
mod transaction;


use rusqlite::Connection;

pub use transaction::Transaction;

/// SQLite-backed note store.
///
/// Owns the connection; every [`crate::storage::NoteRepository`] call runs
/// against it directly.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
