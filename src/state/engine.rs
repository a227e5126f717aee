//! The mutation engine: sole writer of a [`CollectionState`].

use crate::domain::{Note, NoteId, NoteUpdate, record_version};
use crate::infra::{Clock, SystemClock};
use crate::state::collection::find_mut;
use crate::state::{CollectionState, MAX_PINNED, ReconcileReport, SortBy, SortDirection, reconcile};
use std::fmt;

/// Why an operation was turned into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No note has the given ID.
    UnknownNote,
    /// The note is encrypted and the operation would destroy or hide it.
    Encrypted,
    /// Pinning would exceed [`MAX_PINNED`].
    PinCapacity,
    /// Trashed notes cannot be pinned.
    Trashed,
    /// The requested history entry does not exist.
    UnknownVersion,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::UnknownNote => "unknown note",
            Rejection::Encrypted => "note is encrypted",
            Rejection::PinCapacity => "pin capacity reached",
            Rejection::Trashed => "note is in the trash",
            Rejection::UnknownVersion => "no such version",
        };
        f.write_str(reason)
    }
}

/// Result of a mutation. Rejections are not errors: state is simply left
/// as it was, and callers are free to ignore the value and re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Applied => None,
            Outcome::Rejected(r) => Some(*r),
        }
    }
}

fn reject(op: &'static str, id: &NoteId, reason: Rejection) -> Outcome {
    tracing::debug!(op, id = %id, %reason, "mutation rejected");
    Outcome::Rejected(reason)
}

/// Owns the collection state and applies every state transition.
///
/// Each method either applies completely or leaves the state untouched.
/// Methods take `&mut self`, so two mutations can never interleave.
///
/// # Examples
///
/// ```
/// use notekeep::domain::NoteUpdate;
/// use notekeep::state::{NoteStore, selectors};
///
/// let mut store = NoteStore::new();
/// let id = store.create("Ideas", "<p>first</p>", false, false).unwrap();
/// store.update(&id, NoteUpdate::new().pinned(true));
///
/// let pinned = selectors::pinned_notes(store.state());
/// assert_eq!(pinned.len(), 1);
/// assert_eq!(pinned[0].title(), "Ideas");
/// ```
#[derive(Debug)]
pub struct NoteStore<C = SystemClock> {
    state: CollectionState,
    clock: C,
}

impl NoteStore<SystemClock> {
    /// Empty store on the wall clock.
    pub fn new() -> Self {
        Self::from_state(CollectionState::new())
    }

    /// Wraps an existing state (for example one loaded from storage).
    pub fn from_state(state: CollectionState) -> Self {
        Self::with_clock(state, SystemClock)
    }
}

impl Default for NoteStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> NoteStore<C> {
    pub fn with_clock(state: CollectionState, clock: C) -> Self {
        Self { state, clock }
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    pub fn into_state(self) -> CollectionState {
        self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.state.note(id)
    }

    /// Creates a note and returns its ID.
    ///
    /// When `is_pinned` is set and the pinned index is already full the
    /// whole creation is refused and `None` is returned.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        is_pinned: bool,
        is_encrypted: bool,
    ) -> Option<NoteId> {
        if is_pinned && self.state.pinned_notes.len() >= MAX_PINNED {
            tracing::debug!(
                op = "create",
                reason = %Rejection::PinCapacity,
                "mutation rejected"
            );
            return None;
        }

        let id = NoteId::new();
        let now = self.clock.now();
        let note = Note::builder(id.clone(), title, content, now)
            .pinned(is_pinned)
            .encrypted(is_encrypted)
            .build();

        self.state.notes.push(note);
        if is_pinned {
            self.state.pinned_notes.push(id.clone());
        }
        tracing::debug!(id = %id, pinned = is_pinned, encrypted = is_encrypted, "note created");
        Some(id)
    }

    /// Applies a partial update.
    ///
    /// The pre-update title and content are always recorded as a version,
    /// even when nothing in `update` differs. `last_modified` is always
    /// bumped. `is_pinned` only counts when it differs from the note's flag;
    /// pinning past [`MAX_PINNED`] or pinning a trashed note then rejects the
    /// entire update.
    pub fn update(&mut self, id: &NoteId, update: NoteUpdate) -> Outcome {
        let pinned_count = self.state.pinned_notes.len();
        let Some(note) = find_mut(&mut self.state.notes, id) else {
            return reject("update", id, Rejection::UnknownNote);
        };

        let pin_change = update.is_pinned.filter(|&pinned| pinned != note.is_pinned());
        if pin_change == Some(true) {
            if note.is_trashed() {
                return reject("update", id, Rejection::Trashed);
            }
            if pinned_count >= MAX_PINNED {
                return reject("update", id, Rejection::PinCapacity);
            }
        }

        let now = self.clock.now();
        record_version(note, now);

        if let Some(title) = update.title {
            note.set_title(title);
        }
        if let Some(content) = update.content {
            note.set_content(content);
        }
        note.touch(now);

        if let Some(encrypted) = update.is_encrypted {
            note.set_encrypted(encrypted);
        }

        if let Some(pinned) = pin_change {
            tracing::debug!(id = %id, pinned, "pin state changed");
            note.set_pinned(pinned);
            if pinned {
                if !self.state.pinned_notes.contains(id) {
                    self.state.pinned_notes.push(id.clone());
                }
            } else {
                self.state.pinned_notes.retain(|p| p != id);
            }
        }

        tracing::debug!(id = %id, "note updated");
        Outcome::Applied
    }

    pub fn pin(&mut self, id: &NoteId) -> Outcome {
        self.update(id, NoteUpdate::new().pinned(true))
    }

    pub fn unpin(&mut self, id: &NoteId) -> Outcome {
        self.update(id, NoteUpdate::new().pinned(false))
    }

    /// Moves a note to the trash, unpinning it. Encrypted notes are refused.
    pub fn delete(&mut self, id: &NoteId) -> Outcome {
        let Some(note) = find_mut(&mut self.state.notes, id) else {
            return reject("delete", id, Rejection::UnknownNote);
        };
        if note.is_encrypted() {
            return reject("delete", id, Rejection::Encrypted);
        }

        note.set_trashed(true);
        note.set_pinned(false);
        if !self.state.trashed_notes.contains(id) {
            self.state.trashed_notes.push(id.clone());
        }
        self.state.pinned_notes.retain(|p| p != id);

        tracing::debug!(id = %id, "note trashed");
        Outcome::Applied
    }

    /// Takes a note out of the trash. The pin flag is left as it is.
    pub fn restore(&mut self, id: &NoteId) -> Outcome {
        let Some(note) = find_mut(&mut self.state.notes, id) else {
            return reject("restore", id, Rejection::UnknownNote);
        };

        note.set_trashed(false);
        self.state.trashed_notes.retain(|t| t != id);

        tracing::debug!(id = %id, "note restored");
        Outcome::Applied
    }

    /// Destroys a note. Encrypted notes are refused.
    pub fn permanently_delete(&mut self, id: &NoteId) -> Outcome {
        match self.state.note(id) {
            None => return reject("permanently_delete", id, Rejection::UnknownNote),
            Some(note) if note.is_encrypted() => {
                return reject("permanently_delete", id, Rejection::Encrypted);
            }
            Some(_) => {}
        }

        self.state.notes.retain(|n| n.id() != id);
        self.state.pinned_notes.retain(|p| p != id);
        self.state.trashed_notes.retain(|t| t != id);

        tracing::debug!(id = %id, "note permanently deleted");
        Outcome::Applied
    }

    /// Replaces content with `ciphertext` and marks the note encrypted.
    ///
    /// History is cleared, since snapshots would otherwise keep the
    /// plaintext around.
    pub fn encrypt_note(&mut self, id: &NoteId, ciphertext: impl Into<String>) -> Outcome {
        let now = self.clock.now();
        let Some(note) = find_mut(&mut self.state.notes, id) else {
            return reject("encrypt", id, Rejection::UnknownNote);
        };

        note.set_content(ciphertext);
        note.set_encrypted(true);
        note.versions_mut().clear();
        note.touch(now);

        tracing::debug!(id = %id, "note encrypted");
        Outcome::Applied
    }

    /// Replaces content with `plaintext` and clears the encrypted flag.
    pub fn decrypt_note(&mut self, id: &NoteId, plaintext: impl Into<String>) -> Outcome {
        let now = self.clock.now();
        let Some(note) = find_mut(&mut self.state.notes, id) else {
            return reject("decrypt", id, Rejection::UnknownNote);
        };

        note.set_content(plaintext);
        note.set_encrypted(false);
        note.touch(now);

        tracing::debug!(id = %id, "note decrypted");
        Outcome::Applied
    }

    /// Restores title and content from history entry `index` (0 = oldest).
    ///
    /// Goes through [`NoteStore::update`], so the state being replaced is
    /// itself recorded.
    pub fn revert_to(&mut self, id: &NoteId, index: usize) -> Outcome {
        let Some(note) = self.state.note(id) else {
            return reject("revert", id, Rejection::UnknownNote);
        };
        if note.is_encrypted() {
            return reject("revert", id, Rejection::Encrypted);
        }
        let Some(version) = note.versions().get(index) else {
            return reject("revert", id, Rejection::UnknownVersion);
        };

        let update = NoteUpdate::new()
            .title(version.title())
            .content(version.content());
        self.update(id, update)
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.state.filter = filter.into();
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.state.sort_by = sort_by;
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.state.sort_direction = direction;
    }

    /// Runs the index reconciler and logs anything it had to fix.
    pub fn reconcile_integrity(&mut self) -> ReconcileReport {
        let report = reconcile(&mut self.state);
        if report.is_clean() {
            tracing::trace!("index integrity check found nothing to repair");
        } else {
            tracing::warn!(
                pinned_added = report.pinned_added.len(),
                pinned_removed = report.pinned_removed.len(),
                trashed_added = report.trashed_added.len(),
                trashed_removed = report.trashed_removed.len(),
                duplicates = report.duplicates_removed,
                "repaired note index drift"
            );
        }
        report
    }
}
