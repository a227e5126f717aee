//! Output format types for CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Note, NoteId, Version};
use crate::infra::{KeyTerm, preview};
use crate::state::{ReconcileReport, SyncReport};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub is_pinned: bool,
    pub is_encrypted: bool,
    pub is_trashed: bool,
    /// Plain-text preview; empty for encrypted notes.
    pub preview: String,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            created: note.created(),
            last_modified: note.last_modified(),
            is_pinned: note.is_pinned(),
            is_encrypted: note.is_encrypted(),
            is_trashed: note.is_trashed(),
            preview: if note.is_encrypted() {
                String::new()
            } else {
                preview(note.content(), 80)
            },
        }
    }
}

/// A full note in `show` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDetail {
    #[serde(flatten)]
    pub listing: NoteListing,
    /// Content as requested: plain text, raw markup, or absent when the
    /// note is encrypted and no password was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub version_count: usize,
}

/// One history entry.
#[derive(Debug, Serialize)]
pub struct VersionListing {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub preview: String,
}

impl VersionListing {
    pub fn new(index: usize, version: &Version) -> Self {
        Self {
            index,
            timestamp: version.timestamp(),
            title: version.title().to_string(),
            preview: preview(version.content(), 60),
        }
    }
}

/// Result of `check`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckListing {
    pub pinned_added: Vec<String>,
    pub pinned_removed: Vec<String>,
    pub trashed_added: Vec<String>,
    pub trashed_removed: Vec<String>,
    pub duplicates_removed: usize,
    pub reasserted: Vec<String>,
}

impl From<&SyncReport> for CheckListing {
    fn from(report: &SyncReport) -> Self {
        let ReconcileReport {
            pinned_added,
            pinned_removed,
            trashed_added,
            trashed_removed,
            duplicates_removed,
        } = &report.reconcile;
        Self {
            pinned_added: ids(pinned_added),
            pinned_removed: ids(pinned_removed),
            trashed_added: ids(trashed_added),
            trashed_removed: ids(trashed_removed),
            duplicates_removed: *duplicates_removed,
            reasserted: ids(&report.reasserted),
        }
    }
}

fn ids(ids: &[NoteId]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Result of `insights`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsListing {
    pub id: String,
    pub word_count: usize,
    pub key_terms: Vec<KeyTerm>,
    pub summary: String,
}
