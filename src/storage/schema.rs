//! SQLite schema for the note store.

use rusqlite::Connection;

/// Current schema version.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the note store.
///
/// Idempotent; calling it on an existing database leaves data in place.
///
/// # Tables Created
/// - `notes` - One row per note, keyed by ID, versions as a JSON column
/// - `note_index` - The ordered pinned and trashed ID lists
/// - `preferences` - Filter and sort settings
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    // ===========================================
    // Notes Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created TEXT NOT NULL,
            last_modified TEXT NOT NULL,
            is_pinned INTEGER NOT NULL DEFAULT 0,
            is_encrypted INTEGER NOT NULL DEFAULT 0,
            is_trashed INTEGER NOT NULL DEFAULT 0,
            versions TEXT NOT NULL DEFAULT '[]'
        );",
    )?;

    // ===========================================
    // Secondary Indexes
    // ===========================================
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_notes_last_modified ON notes(last_modified);
         CREATE INDEX IF NOT EXISTS idx_notes_created ON notes(created);
         CREATE INDEX IF NOT EXISTS idx_notes_is_pinned ON notes(is_pinned);
         CREATE INDEX IF NOT EXISTS idx_notes_is_trashed ON notes(is_trashed);",
    )?;

    // ===========================================
    // Pinned/Trashed ID Lists
    // ===========================================
    // No foreign key: the lists may hold stale IDs until reconciled.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS note_index (
            kind TEXT NOT NULL CHECK (kind IN ('pinned', 'trashed')),
            position INTEGER NOT NULL,
            note_id TEXT,
            PRIMARY KEY (kind, position)
        );",
    )?;

    // ===========================================
    // Preferences
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Schema Version Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
