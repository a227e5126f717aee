//! Self-healing pass run whenever a store is opened for listing.

use crate::domain::{NoteId, NoteUpdate};
use crate::infra::Clock;
use crate::state::{NoteStore, ReconcileReport};

/// What the sync guard did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Corrections made by the reconciler.
    pub reconcile: ReconcileReport,
    /// Notes whose pin flag was re-asserted through the update path.
    pub reasserted: Vec<NoteId>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.reconcile.is_clean() && self.reasserted.is_empty()
    }
}

/// Reconciles the indices, then double-checks every active note's pin flag
/// against the pinned index.
///
/// The second pass goes through [`NoteStore::update`] with the note's own
/// flag, so any correction is versioned like a user edit. After a
/// successful reconcile it finds nothing to do.
pub fn run_sync_guard<C: Clock>(store: &mut NoteStore<C>) -> SyncReport {
    let reconcile = store.reconcile_integrity();

    let mismatched: Vec<(NoteId, bool)> = store
        .state()
        .notes()
        .iter()
        .filter(|n| !n.is_trashed())
        .filter(|n| n.is_pinned() != store.state().is_indexed_pinned(n.id()))
        .map(|n| (n.id().clone(), n.is_pinned()))
        .collect();

    let mut reasserted = Vec::with_capacity(mismatched.len());
    for (id, pinned) in mismatched {
        tracing::warn!(id = %id, pinned, "pin flag disagrees with index after reconcile");
        if store.update(&id, NoteUpdate::new().pinned(pinned)).is_applied() {
            reasserted.push(id);
        }
    }

    SyncReport {
        reconcile,
        reasserted,
    }
}
