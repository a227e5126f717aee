//! NoteRepository implementation for SqliteStore.

use super::SqliteStore;
use crate::domain::{Note, NoteId, Version};
use crate::state::{CollectionState, SortBy, SortDirection, decode_index};
use crate::storage::{NoteRepository, StorageError, StorageResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashSet;

const NOTE_COLUMNS: &str =
    "id, title, content, created, last_modified, is_pinned, is_encrypted, is_trashed, versions";

const PREF_FILTER: &str = "filter";
const PREF_SORT_BY: &str = "sort_by";
const PREF_SORT_DIRECTION: &str = "sort_direction";

const KIND_PINNED: &str = "pinned";
const KIND_TRASHED: &str = "trashed";

/// Fixed-width RFC 3339 so text ordering matches time ordering.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(value: &str, column: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::InvalidData(format!("invalid {column} timestamp '{value}': {e}")))
}

struct NoteRow {
    id: String,
    title: String,
    content: String,
    created: String,
    last_modified: String,
    is_pinned: bool,
    is_encrypted: bool,
    is_trashed: bool,
    versions: String,
}

impl NoteRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            created: row.get(3)?,
            last_modified: row.get(4)?,
            is_pinned: row.get(5)?,
            is_encrypted: row.get(6)?,
            is_trashed: row.get(7)?,
            versions: row.get(8)?,
        })
    }

    fn into_note(self) -> StorageResult<Note> {
        let id: NoteId = self
            .id
            .parse()
            .map_err(|e| StorageError::InvalidData(format!("invalid note ID in database: {e}")))?;
        let created = parse_timestamp(&self.created, "created")?;
        let last_modified = parse_timestamp(&self.last_modified, "last_modified")?;
        let versions: Vec<Version> =
            serde_json::from_str(&self.versions).map_err(|source| StorageError::Versions {
                id: self.id.clone(),
                source,
            })?;

        Ok(Note::builder(id, self.title, self.content, created)
            .last_modified(last_modified)
            .pinned(self.is_pinned)
            .encrypted(self.is_encrypted)
            .trashed(self.is_trashed)
            .versions(versions)
            .build())
    }
}

fn query_notes(conn: &Connection, filter: &str) -> StorageResult<Vec<Note>> {
    let sql = format!("SELECT {NOTE_COLUMNS} FROM notes {filter} ORDER BY rowid");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], NoteRow::read)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(NoteRow::into_note).collect()
}

fn upsert_note(conn: &Connection, note: &Note) -> StorageResult<()> {
    let versions = serde_json::to_string(note.versions()).map_err(|source| StorageError::Versions {
        id: note.id().to_string(),
        source,
    })?;

    // ON CONFLICT keeps the rowid, so insertion order survives updates
    conn.execute(
        &format!(
            "INSERT INTO notes ({NOTE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                created = excluded.created,
                last_modified = excluded.last_modified,
                is_pinned = excluded.is_pinned,
                is_encrypted = excluded.is_encrypted,
                is_trashed = excluded.is_trashed,
                versions = excluded.versions"
        ),
        params![
            note.id().to_string(),
            note.title(),
            note.content(),
            format_timestamp(note.created()),
            format_timestamp(note.last_modified()),
            note.is_pinned(),
            note.is_encrypted(),
            note.is_trashed(),
            versions,
        ],
    )?;
    Ok(())
}

fn load_index(conn: &Connection, kind: &str) -> StorageResult<Vec<Option<String>>> {
    let mut stmt =
        conn.prepare("SELECT note_id FROM note_index WHERE kind = ? ORDER BY position")?;
    let entries = stmt
        .query_map([kind], |row| row.get::<_, Option<String>>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}

fn write_index(conn: &Connection, kind: &str, ids: &[NoteId]) -> StorageResult<()> {
    conn.execute("DELETE FROM note_index WHERE kind = ?", [kind])?;
    let mut stmt =
        conn.prepare("INSERT INTO note_index (kind, position, note_id) VALUES (?1, ?2, ?3)")?;
    for (position, id) in ids.iter().enumerate() {
        stmt.execute(params![kind, position as i64, id.to_string()])?;
    }
    Ok(())
}

fn load_preference(conn: &Connection, key: &str) -> StorageResult<Option<String>> {
    Ok(conn
        .query_row("SELECT value FROM preferences WHERE key = ?", [key], |row| {
            row.get(0)
        })
        .optional()?)
}

fn write_preference(conn: &Connection, key: &str, value: &str) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO preferences (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [key, value],
    )?;
    Ok(())
}

/// Parses a stored preference, falling back to the default with a warning.
fn parse_preference<T>(conn: &Connection, key: &str) -> StorageResult<T>
where
    T: std::str::FromStr<Err = String> + Default,
{
    let Some(raw) = load_preference(conn, key)? else {
        return Ok(T::default());
    };
    Ok(raw.parse().unwrap_or_else(|reason: String| {
        tracing::warn!(key, %reason, "ignoring unreadable preference");
        T::default()
    }))
}

impl NoteRepository for SqliteStore {
    fn get(&self, id: &NoteId) -> StorageResult<Option<Note>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"),
                [id.to_string()],
                NoteRow::read,
            )
            .optional()?;
        row.map(NoteRow::into_note).transpose()
    }

    fn put(&mut self, note: &Note) -> StorageResult<()> {
        upsert_note(&self.conn, note)
    }

    fn remove(&mut self, id: &NoteId) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM notes WHERE id = ?", [id.to_string()])?;
        Ok(())
    }

    fn all(&self) -> StorageResult<Vec<Note>> {
        query_notes(&self.conn, "")
    }

    fn pinned(&self) -> StorageResult<Vec<Note>> {
        query_notes(&self.conn, "WHERE is_pinned = 1")
    }

    fn trashed(&self) -> StorageResult<Vec<Note>> {
        query_notes(&self.conn, "WHERE is_trashed = 1")
    }

    fn load_state(&self) -> StorageResult<CollectionState> {
        let notes = self.all()?;
        let pinned = decode_index(Some(load_index(&self.conn, KIND_PINNED)?), "pinnedNotes");
        let trashed = decode_index(Some(load_index(&self.conn, KIND_TRASHED)?), "trashedNotes");

        let filter = load_preference(&self.conn, PREF_FILTER)?.unwrap_or_default();
        let sort_by: SortBy = parse_preference(&self.conn, PREF_SORT_BY)?;
        let direction: SortDirection = parse_preference(&self.conn, PREF_SORT_DIRECTION)?;

        tracing::debug!(notes = notes.len(), "loaded note collection");
        Ok(CollectionState::from_parts(notes, pinned, trashed).with_view(filter, sort_by, direction))
    }

    fn save_state(&mut self, state: &CollectionState) -> StorageResult<()> {
        self.in_transaction(|tx| {
            let conn = tx.conn();

            let keep: HashSet<String> =
                state.notes().iter().map(|n| n.id().to_string()).collect();
            let stored: Vec<String> = conn
                .prepare("SELECT id FROM notes")?
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            for id in stored.iter().filter(|id| !keep.contains(*id)) {
                conn.execute("DELETE FROM notes WHERE id = ?", [id])?;
            }

            for note in state.notes() {
                upsert_note(conn, note)?;
            }
            write_index(conn, KIND_PINNED, state.pinned_ids())?;
            write_index(conn, KIND_TRASHED, state.trashed_ids())?;

            write_preference(conn, PREF_FILTER, state.filter())?;
            write_preference(conn, PREF_SORT_BY, state.sort_by().as_str())?;
            write_preference(conn, PREF_SORT_DIRECTION, state.sort_direction().as_str())?;
            Ok(())
        })?;

        tracing::info!(notes = state.len(), "saved note collection");
        Ok(())
    }
}
