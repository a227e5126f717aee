//! Bounded edit history attached to each note.

use crate::domain::Note;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of snapshots retained per note.
pub const MAX_VERSIONS: usize = 5;

/// Snapshot of a note's title and content taken just before an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    timestamp: DateTime<Utc>,
    title: String,
    content: String,
}

impl Version {
    pub fn new(
        timestamp: DateTime<Utc>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            title: title.into(),
            content: content.into(),
        }
    }

    /// When the snapshot was taken.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// FIFO of at most [`MAX_VERSIONS`] snapshots, oldest first.
///
/// Decoding a longer list keeps only the newest entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Version>", into = "Vec<Version>")]
pub struct VersionHistory {
    entries: VecDeque<Version>,
}

impl VersionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot, evicting the oldest one when already full.
    pub fn push(&mut self, version: Version) {
        while self.entries.len() >= MAX_VERSIONS {
            self.entries.pop_front();
        }
        self.entries.push_back(version);
    }

    /// Removes every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot at `index`, where 0 is the oldest retained.
    pub fn get(&self, index: usize) -> Option<&Version> {
        self.entries.get(index)
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> Option<&Version> {
        self.entries.back()
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Version> {
        self.entries.iter()
    }
}

impl From<Vec<Version>> for VersionHistory {
    fn from(versions: Vec<Version>) -> Self {
        let mut history = Self::new();
        for version in versions {
            history.push(version);
        }
        history
    }
}

impl From<VersionHistory> for Vec<Version> {
    fn from(history: VersionHistory) -> Self {
        history.entries.into()
    }
}

/// Snapshots the note's current (pre-update) title and content.
///
/// Called before every accepted update, whether or not the update changes
/// anything.
pub fn record_version(note: &mut Note, now: DateTime<Utc>) {
    let snapshot = Version::new(now, note.title(), note.content());
    note.versions_mut().push(snapshot);
}
