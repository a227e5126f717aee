//! Store root: the note set, its two ID indices and view preferences.

use crate::domain::{Note, NoteId};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of pinned notes.
pub const MAX_PINNED: usize = 5;

/// Sort key for note listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    LastModified,
    Created,
    Title,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::LastModified => "lastModified",
            SortBy::Created => "created",
            SortBy::Title => "title",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lastModified" | "last-modified" | "modified" => Ok(SortBy::LastModified),
            "created" => Ok(SortBy::Created),
            "title" => Ok(SortBy::Title),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// Canonical state owned by [`crate::state::NoteStore`].
///
/// `notes` is authoritative. `pinned_notes` and `trashed_notes` are ordered
/// caches of IDs derived from the per-note flags; they can drift and are
/// repaired by [`crate::state::reconcile`].
///
/// Decoding is lenient about the two indices: a missing, null or non-array
/// index becomes empty and invalid entries are dropped, each with a warning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionState {
    #[serde(default)]
    pub(crate) notes: Vec<Note>,
    #[serde(default, deserialize_with = "lenient_pinned")]
    pub(crate) pinned_notes: Vec<NoteId>,
    #[serde(default, deserialize_with = "lenient_trashed")]
    pub(crate) trashed_notes: Vec<NoteId>,
    #[serde(default)]
    pub(crate) filter: String,
    #[serde(default)]
    pub(crate) sort_by: SortBy,
    #[serde(default)]
    pub(crate) sort_direction: SortDirection,
}

impl CollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a state from raw parts without checking the indices
    /// against the flags. Used when loading from storage.
    pub fn from_parts(
        notes: Vec<Note>,
        pinned_notes: Vec<NoteId>,
        trashed_notes: Vec<NoteId>,
    ) -> Self {
        Self {
            notes,
            pinned_notes,
            trashed_notes,
            ..Self::default()
        }
    }

    /// Sets view preferences (builder style).
    pub fn with_view(mut self, filter: impl Into<String>, sort_by: SortBy, direction: SortDirection) -> Self {
        self.filter = filter.into();
        self.sort_by = sort_by;
        self.sort_direction = direction;
        self
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Pinned-ID index, in pin order.
    pub fn pinned_ids(&self) -> &[NoteId] {
        &self.pinned_notes
    }

    /// Trashed-ID index, in trash order.
    pub fn trashed_ids(&self) -> &[NoteId] {
        &self.trashed_notes
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.note(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// True when `id` is in the pinned index.
    pub fn is_indexed_pinned(&self, id: &NoteId) -> bool {
        self.pinned_notes.contains(id)
    }

    /// True when `id` is in the trashed index.
    pub fn is_indexed_trashed(&self, id: &NoteId) -> bool {
        self.trashed_notes.contains(id)
    }
}

/// Finds a note for mutation within a borrowed note list.
pub(crate) fn find_mut<'a>(notes: &'a mut [Note], id: &NoteId) -> Option<&'a mut Note> {
    notes.iter_mut().find(|n| n.id() == id)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Ids(Vec<RawEntry>),
    Malformed(IgnoredAny),
}

/// One array element; anything but a string is kept aside to be dropped.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Id(String),
    Other(IgnoredAny),
}

impl RawEntry {
    fn into_string(self) -> Option<String> {
        match self {
            RawEntry::Id(s) => Some(s),
            RawEntry::Other(_) => None,
        }
    }
}

/// Decodes one index, tolerating the shapes a corrupted snapshot can have.
pub(crate) fn decode_index(raw: Option<Vec<Option<String>>>, name: &str) -> Vec<NoteId> {
    let Some(entries) = raw else {
        tracing::warn!(index = name, "index missing or malformed; starting empty");
        return Vec::new();
    };

    let mut ids = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.as_deref().map(str::parse::<NoteId>) {
            Some(Ok(id)) => ids.push(id),
            Some(Err(e)) => {
                tracing::warn!(index = name, value = e.invalid_value(), "dropping invalid index entry")
            }
            None => tracing::warn!(index = name, "dropping non-string index entry"),
        }
    }
    ids
}

fn lenient_index<'de, D>(deserializer: D, name: &str) -> Result<Vec<NoteId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match RawIndex::deserialize(deserializer)? {
        RawIndex::Ids(entries) => Some(entries.into_iter().map(RawEntry::into_string).collect()),
        RawIndex::Malformed(_) => None,
    };
    Ok(decode_index(raw, name))
}

fn lenient_pinned<'de, D>(deserializer: D) -> Result<Vec<NoteId>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_index(deserializer, "pinnedNotes")
}

fn lenient_trashed<'de, D>(deserializer: D) -> Result<Vec<NoteId>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_index(deserializer, "trashedNotes")
}
