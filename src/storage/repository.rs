//! NoteRepository trait and storage errors.

use crate::domain::{Note, NoteId};
use crate::state::CollectionState;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the note store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A JSON column could not be encoded or decoded.
    #[error("invalid version history for note {id}: {source}")]
    Versions {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value could not be interpreted.
    #[error("invalid stored data: {0}")]
    InvalidData(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence collaborator for notes.
///
/// Records are keyed by note ID. `load_state` and `save_state` move a whole
/// [`CollectionState`]; the per-note methods let callers work on single
/// records without loading everything.
pub trait NoteRepository {
    /// Fetches a single note.
    fn get(&self, id: &NoteId) -> StorageResult<Option<Note>>;

    /// Inserts or replaces a note.
    fn put(&mut self, note: &Note) -> StorageResult<()>;

    /// Deletes a note record. Missing IDs are not an error.
    fn remove(&mut self, id: &NoteId) -> StorageResult<()>;

    /// Every stored note, in insertion order.
    fn all(&self) -> StorageResult<Vec<Note>>;

    /// Notes whose pinned flag is set, using the `is_pinned` index.
    fn pinned(&self) -> StorageResult<Vec<Note>>;

    /// Notes whose trashed flag is set, using the `is_trashed` index.
    fn trashed(&self) -> StorageResult<Vec<Note>>;

    /// Loads the full collection, including the ID lists and preferences.
    ///
    /// The ID lists are returned as stored; callers are expected to run the
    /// reconciler.
    fn load_state(&self) -> StorageResult<CollectionState>;

    /// Replaces the stored collection with `state`, atomically.
    fn save_state(&mut self, state: &CollectionState) -> StorageResult<()>;
}
