//! Note entity: identity, rich-text content, lifecycle flags and history.

use crate::domain::{NoteId, Version, VersionHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A note as held by the collection store.
///
/// `content` is serialized markup from the editor, or ciphertext while
/// `is_encrypted` is set. Flags default to false and history to empty, both
/// when constructing and when decoding a record that omits them.
///
/// Mutation goes through [`crate::state::NoteStore`]; outside the crate a
/// note is read-only.
///
/// # Examples
///
/// ```
/// use notekeep::domain::{Note, NoteId};
/// use chrono::Utc;
///
/// let note = Note::new(NoteId::new(), "Groceries", "<p>milk</p>", Utc::now());
/// assert!(!note.is_pinned());
/// assert!(note.versions().is_empty());
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    created: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    #[serde(default)]
    is_pinned: bool,
    #[serde(default)]
    is_encrypted: bool,
    #[serde(default)]
    is_trashed: bool,
    #[serde(default)]
    versions: VersionHistory,
}

impl Note {
    /// Creates an unpinned, unencrypted, untrashed note stamped at `now`.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created: now,
            last_modified: now,
            is_pinned: false,
            is_encrypted: false,
            is_trashed: false,
            versions: VersionHistory::new(),
        }
    }

    /// Starts a builder for notes with explicit flags or timestamps
    /// (storage decoding, fixtures).
    pub fn builder(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        created: DateTime<Utc>,
    ) -> NoteBuilder {
        NoteBuilder::new(id, title, content, created)
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Markup, or ciphertext when encrypted.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn is_pinned(&self) -> bool {
        self.is_pinned
    }

    pub fn is_encrypted(&self) -> bool {
        self.is_encrypted
    }

    pub fn is_trashed(&self) -> bool {
        self.is_trashed
    }

    /// Edit history, oldest first.
    pub fn versions(&self) -> &VersionHistory {
        &self.versions
    }

    pub(crate) fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub(crate) fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_modified = now;
    }

    pub(crate) fn set_pinned(&mut self, pinned: bool) {
        self.is_pinned = pinned;
    }

    pub(crate) fn set_encrypted(&mut self, encrypted: bool) {
        self.is_encrypted = encrypted;
    }

    pub(crate) fn set_trashed(&mut self, trashed: bool) {
        self.is_trashed = trashed;
    }

    pub(crate) fn versions_mut(&mut self) -> &mut VersionHistory {
        &mut self.versions
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // content may be ciphertext or long markup; keep debug output short
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("content_len", &self.content.len())
            .field("created", &self.created)
            .field("last_modified", &self.last_modified)
            .field("is_pinned", &self.is_pinned)
            .field("is_encrypted", &self.is_encrypted)
            .field("is_trashed", &self.is_trashed)
            .field("versions", &self.versions.len())
            .finish()
    }
}

/// Builder for notes with non-default flags, timestamps or history.
pub struct NoteBuilder {
    note: Note,
}

impl NoteBuilder {
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            note: Note::new(id, title, content, created),
        }
    }

    /// Sets the last-modified timestamp (defaults to `created`).
    pub fn last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.note.last_modified = last_modified;
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.note.is_pinned = pinned;
        self
    }

    pub fn encrypted(mut self, encrypted: bool) -> Self {
        self.note.is_encrypted = encrypted;
        self
    }

    pub fn trashed(mut self, trashed: bool) -> Self {
        self.note.is_trashed = trashed;
        self
    }

    /// Sets the history; only the newest five entries are kept.
    pub fn versions(mut self, versions: Vec<Version>) -> Self {
        self.note.versions = versions.into();
        self
    }

    pub fn build(self) -> Note {
        self.note
    }
}
