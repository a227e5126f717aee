//! Read-only views derived from a [`CollectionState`].
//!
//! Nothing here mutates or caches; every call recomputes from the state.

use crate::domain::{Note, NoteId};
use crate::infra::plain_text;
use crate::state::{CollectionState, SortBy, SortDirection};
use std::cmp::Ordering;
use std::collections::HashSet;

pub fn all_notes(state: &CollectionState) -> Vec<&Note> {
    state.notes().iter().collect()
}

/// Notes that are not in the trash.
pub fn active_notes(state: &CollectionState) -> Vec<&Note> {
    state.notes().iter().filter(|n| !n.is_trashed()).collect()
}

/// Notes that are flagged pinned, not trashed, and present in the pinned
/// index. A note disagreeing with the index is not shown, and the
/// disagreement is logged.
pub fn pinned_notes(state: &CollectionState) -> Vec<&Note> {
    let index: HashSet<&NoteId> = state.pinned_ids().iter().collect();

    let flagged_not_indexed: Vec<&NoteId> = state
        .notes()
        .iter()
        .filter(|n| n.is_pinned() && !n.is_trashed() && !index.contains(n.id()))
        .map(|n| n.id())
        .collect();
    if !flagged_not_indexed.is_empty() {
        tracing::warn!(
            ids = ?flagged_not_indexed,
            "notes flagged pinned but missing from pinned index"
        );
    }

    let indexed_not_flagged: Vec<&NoteId> = state
        .pinned_ids()
        .iter()
        .filter(|id| {
            state
                .note(id)
                .is_none_or(|n| !n.is_pinned() || n.is_trashed())
        })
        .collect();
    if !indexed_not_flagged.is_empty() {
        tracing::warn!(
            ids = ?indexed_not_flagged,
            "pinned index entries without a matching pinned note"
        );
    }

    state
        .notes()
        .iter()
        .filter(|n| n.is_pinned() && !n.is_trashed() && index.contains(n.id()))
        .collect()
}

/// Notes that are not pinned, not trashed, and absent from the pinned index.
pub fn unpinned_notes(state: &CollectionState) -> Vec<&Note> {
    let index: HashSet<&NoteId> = state.pinned_ids().iter().collect();
    state
        .notes()
        .iter()
        .filter(|n| !n.is_pinned() && !n.is_trashed() && !index.contains(n.id()))
        .collect()
}

/// Notes that are flagged trashed and present in the trashed index.
pub fn trashed_notes(state: &CollectionState) -> Vec<&Note> {
    let index: HashSet<&NoteId> = state.trashed_ids().iter().collect();
    state
        .notes()
        .iter()
        .filter(|n| n.is_trashed() && index.contains(n.id()))
        .collect()
}

/// Looks a note up by ID, trashed or not.
pub fn note_by_id<'a>(state: &'a CollectionState, id: &NoteId) -> Option<&'a Note> {
    state.note(id)
}

/// The active note created most recently.
pub fn most_recent_note(state: &CollectionState) -> Option<&Note> {
    state
        .notes()
        .iter()
        .filter(|n| !n.is_trashed())
        .max_by_key(|n| n.created())
}

/// True when `filter` occurs (case-insensitively) in the title, or in the
/// plain text of the content for unencrypted notes. An empty filter matches
/// everything.
pub fn matches_filter(note: &Note, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    if note.title().to_lowercase().contains(&needle) {
        return true;
    }
    // ciphertext is never searched
    !note.is_encrypted() && plain_text(note.content()).to_lowercase().contains(&needle)
}

fn compare(a: &Note, b: &Note, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::LastModified => b.last_modified().cmp(&a.last_modified()),
        SortBy::Created => b.created().cmp(&a.created()),
        SortBy::Title => a
            .title()
            .to_lowercase()
            .cmp(&b.title().to_lowercase())
            .then_with(|| a.title().cmp(b.title())),
    }
}

/// Filters `notes` and sorts the survivors.
///
/// With `Desc`, timestamps come newest first and titles in lexicographic
/// order; `Asc` reverses the comparison. The sort is stable, so notes with
/// equal keys keep their input order.
pub fn filtered_and_sorted<'a>(
    notes: &[&'a Note],
    filter: &str,
    sort_by: SortBy,
    direction: SortDirection,
) -> Vec<&'a Note> {
    let mut result: Vec<&Note> = notes
        .iter()
        .copied()
        .filter(|n| matches_filter(n, filter))
        .collect();

    result.sort_by(|a, b| {
        let ord = compare(a, b, sort_by);
        match direction {
            SortDirection::Desc => ord,
            SortDirection::Asc => ord.reverse(),
        }
    });
    result
}

/// Active notes run through [`filtered_and_sorted`] with the state's own
/// filter and sort preferences.
pub fn filtered_notes(state: &CollectionState) -> Vec<&Note> {
    filtered_and_sorted(
        &active_notes(state),
        state.filter(),
        state.sort_by(),
        state.sort_direction(),
    )
}
