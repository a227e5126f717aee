//! Builder for test notes with sensible defaults.

use chrono::{DateTime, Duration, Utc};
use notekeep::domain::{Note, NoteId, Version};

/// Builder for creating test notes with sensible defaults.
///
/// Automatically generates an ID and timestamps, with a fluent API
/// for flags and history.
#[derive(Debug)]
pub struct TestNote {
    id: NoteId,
    title: String,
    content: String,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    pinned: bool,
    encrypted: bool,
    trashed: bool,
    versions: Vec<Version>,
}

#[allow(dead_code)]
impl TestNote {
    /// Creates a new test note with the given title.
    ///
    /// Automatically generates a unique ID and sets timestamps to now.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            title: title.into(),
            content: String::new(),
            created: now,
            modified: now,
            pinned: false,
            encrypted: false,
            trashed: false,
            versions: Vec::new(),
        }
    }

    /// Sets an explicit ID for the note.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into().parse().expect("Invalid NoteId");
        self
    }

    /// Sets the markup content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Shifts the modification time `minutes` into the past.
    pub fn modified_minutes_ago(mut self, minutes: i64) -> Self {
        self.modified = Utc::now() - Duration::minutes(minutes);
        self.created = self.created.min(self.modified);
        self
    }

    /// Sets the pinned flag (the index is left to the caller).
    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// Sets the encrypted flag. Content is stored as given.
    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    /// Sets the trashed flag (the index is left to the caller).
    pub fn trashed(mut self) -> Self {
        self.trashed = true;
        self
    }

    /// Appends a history entry.
    pub fn version(mut self, title: &str, content: &str) -> Self {
        self.versions
            .push(Version::new(self.modified, title, content));
        self
    }

    /// Returns the note ID.
    pub fn note_id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the 10-character ID prefix.
    pub fn id_prefix(&self) -> String {
        self.id.prefix()
    }

    /// Converts to a domain Note.
    pub fn to_note(&self) -> Note {
        Note::builder(
            self.id.clone(),
            self.title.clone(),
            self.content.clone(),
            self.created,
        )
        .last_modified(self.modified)
        .pinned(self.pinned)
        .encrypted(self.encrypted)
        .trashed(self.trashed)
        .versions(self.versions.clone())
        .build()
    }
}
