//! Note resolution utilities.

use crate::domain::{Note, NoteId};
use crate::state::CollectionState;

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult<'a> {
    /// Exactly one note matched.
    Unique(&'a Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<&'a Note>),
    /// No notes matched.
    NotFound,
}

/// Prints the candidates of an ambiguous identifier to stderr.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[&Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        let mut flags = Vec::new();
        if note.is_pinned() {
            flags.push("pinned");
        }
        if note.is_trashed() {
            flags.push("trashed");
        }
        if note.is_encrypted() {
            flags.push("encrypted");
        }
        if flags.is_empty() {
            eprintln!("  {} - {}", note.id().prefix(), note.title());
        } else {
            eprintln!("  {} - {} ({})", note.id().prefix(), note.title(), flags.join(", "));
        }
    }
    eprintln!();
    eprintln!("Use the ID prefix to specify which note you mean.");
}

/// Resolves a note identifier, trashed notes included.
///
/// Resolution order:
/// 1. Full ID
/// 2. ID prefix (if input looks like a ULID prefix)
/// 3. Exact title, ignoring case
///
/// A full ID or a single prefix match wins outright. Otherwise prefix and
/// title matches are pooled.
pub fn resolve_note<'a>(state: &'a CollectionState, identifier: &str) -> ResolveResult<'a> {
    let identifier = identifier.trim();

    if let Ok(id) = identifier.parse::<NoteId>()
        && let Some(note) = state.note(&id)
    {
        return ResolveResult::Unique(note);
    }

    let looks_like_id =
        identifier.len() >= 4 && identifier.chars().all(|c| c.is_ascii_alphanumeric());

    let mut candidates: Vec<&Note> = Vec::new();

    if looks_like_id {
        let id_matches: Vec<&Note> = state
            .notes()
            .iter()
            .filter(|n| n.id().matches_prefix(identifier))
            .collect();
        if let [only] = id_matches.as_slice() {
            return ResolveResult::Unique(only);
        }
        candidates.extend(id_matches);
    }

    let lowered = identifier.to_lowercase();
    candidates.extend(
        state
            .notes()
            .iter()
            .filter(|n| n.title().to_lowercase() == lowered),
    );

    candidates.sort_by_key(|n| n.id().clone());
    candidates.dedup_by(|a, b| a.id() == b.id());

    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(candidates[0]),
        _ => ResolveResult::Ambiguous(candidates),
    }
}
