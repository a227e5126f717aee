//! Connection management for SqliteStore.

use super::SqliteStore;
use crate::storage::{StorageError, StorageResult, create_schema};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

impl SqliteStore {
    /// Opens an in-memory store. Nothing is persisted.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Opens or creates a store at `path`, creating parent directories.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        tracing::info!(path = %path.display(), "opened note store");
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
