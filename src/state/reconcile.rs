//! Repairs the pinned and trashed ID indices from the per-note flags.

use crate::domain::NoteId;
use crate::state::CollectionState;
use std::collections::HashSet;

/// What a reconcile pass changed. Empty when the indices already agreed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Pinned notes that were missing from the pinned index.
    pub pinned_added: Vec<NoteId>,
    /// Index entries for notes that are unpinned, trashed or gone.
    pub pinned_removed: Vec<NoteId>,
    /// Trashed notes that were missing from the trashed index.
    pub trashed_added: Vec<NoteId>,
    /// Index entries for notes that are untrashed or gone.
    pub trashed_removed: Vec<NoteId>,
    /// Repeated entries dropped from either index.
    pub duplicates_removed: usize,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.pinned_added.is_empty()
            && self.pinned_removed.is_empty()
            && self.trashed_added.is_empty()
            && self.trashed_removed.is_empty()
            && self.duplicates_removed == 0
    }

    /// Total number of index entries added or removed.
    pub fn corrections(&self) -> usize {
        self.pinned_added.len()
            + self.pinned_removed.len()
            + self.trashed_added.len()
            + self.trashed_removed.len()
            + self.duplicates_removed
    }
}

/// Makes both indices agree with the note flags.
///
/// Afterwards the pinned index holds exactly the notes with
/// `is_pinned && !is_trashed` and the trashed index exactly the notes with
/// `is_trashed`, each once. Existing entries keep their relative order and
/// new ones are appended in note order. Running it twice in a row changes
/// nothing the second time.
///
/// The flags are never modified, so if more than [`super::MAX_PINNED`]
/// notes carry the pin flag the pinned index will exceed capacity; that is
/// logged, not corrected.
pub fn reconcile(state: &mut CollectionState) -> ReconcileReport {
    let mut report = ReconcileReport {
        duplicates_removed: dedup(&mut state.pinned_notes) + dedup(&mut state.trashed_notes),
        ..ReconcileReport::default()
    };

    // flag -> index
    for note in &state.notes {
        let id = note.id();
        let want_pinned = note.is_pinned() && !note.is_trashed();
        let has_pinned = state.pinned_notes.contains(id);
        if want_pinned && !has_pinned {
            state.pinned_notes.push(id.clone());
            report.pinned_added.push(id.clone());
        } else if !want_pinned && has_pinned {
            state.pinned_notes.retain(|p| p != id);
            report.pinned_removed.push(id.clone());
        }

        let has_trashed = state.trashed_notes.contains(id);
        if note.is_trashed() && !has_trashed {
            state.trashed_notes.push(id.clone());
            report.trashed_added.push(id.clone());
        } else if !note.is_trashed() && has_trashed {
            state.trashed_notes.retain(|t| t != id);
            report.trashed_removed.push(id.clone());
        }
    }

    // stale IDs with no note behind them
    let active: HashSet<&NoteId> = state
        .notes
        .iter()
        .filter(|n| !n.is_trashed())
        .map(|n| n.id())
        .collect();
    let known: HashSet<&NoteId> = state.notes.iter().map(|n| n.id()).collect();

    state.pinned_notes.retain(|id| {
        let keep = active.contains(id);
        if !keep {
            report.pinned_removed.push(id.clone());
        }
        keep
    });
    state.trashed_notes.retain(|id| {
        let keep = known.contains(id);
        if !keep {
            report.trashed_removed.push(id.clone());
        }
        keep
    });

    if state.pinned_notes.len() > super::MAX_PINNED {
        tracing::warn!(
            pinned = state.pinned_notes.len(),
            capacity = super::MAX_PINNED,
            "more notes carry the pin flag than the pin capacity allows"
        );
    }

    report
}

/// Removes repeated IDs, keeping first occurrences. Returns how many went.
fn dedup(ids: &mut Vec<NoteId>) -> usize {
    let before = ids.len();
    let mut seen = HashSet::with_capacity(before);
    ids.retain(|id| seen.insert(id.clone()));
    before - ids.len()
}
