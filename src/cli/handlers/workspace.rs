//! Opened note database plus the in-memory store built from it.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use super::resolve::{ResolveResult, print_ambiguous_notes, resolve_note};
use crate::domain::{Note, NoteId};
use crate::state::selectors::note_by_id;
use crate::state::{NoteStore, SyncReport, run_sync_guard};
use crate::storage::{DB_FILE, NoteRepository, SqliteStore};

/// Returns the database path for a data directory.
pub(crate) fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE)
}

/// A loaded collection ready for one command.
///
/// Opening runs the sync guard, so every command sees reconciled indices.
/// Changes are written back by [`Workspace::save`] only when something was
/// touched.
pub struct Workspace {
    db: SqliteStore,
    store: NoteStore,
    sync: SyncReport,
    dirty: bool,
}

impl Workspace {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = db_path(data_dir);
        let db = SqliteStore::open(&path)
            .with_context(|| format!("failed to open note database at {}", path.display()))?;
        Self::from_db(db)
    }

    pub fn from_db(db: SqliteStore) -> Result<Self> {
        let state = db.load_state().context("failed to load notes")?;
        let mut store = NoteStore::from_state(state);
        let sync = run_sync_guard(&mut store);
        let dirty = !sync.is_clean();
        Ok(Self {
            db,
            store,
            sync,
            dirty,
        })
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Mutable access; marks the workspace for saving.
    pub fn store_mut(&mut self) -> &mut NoteStore {
        self.dirty = true;
        &mut self.store
    }

    /// What the sync guard repaired when the workspace was opened.
    pub fn sync_report(&self) -> &SyncReport {
        &self.sync
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn db(&self) -> &SqliteStore {
        &self.db
    }

    /// Writes the collection back if anything changed.
    pub fn save(&mut self) -> Result<()> {
        if self.dirty {
            self.db
                .save_state(self.store.state())
                .context("failed to save notes")?;
            self.dirty = false;
        }
        Ok(())
    }

    /// Resolves a user-supplied identifier to exactly one note.
    pub fn resolve(&self, identifier: &str) -> Result<NoteId> {
        match resolve_note(self.store.state(), identifier) {
            ResolveResult::Unique(note) => Ok(note.id().clone()),
            ResolveResult::Ambiguous(notes) => {
                print_ambiguous_notes(identifier, &notes);
                bail!("ambiguous note identifier");
            }
            ResolveResult::NotFound => bail!("note not found: '{}'", identifier),
        }
    }

    /// Looks up a note that is known to exist.
    pub fn note(&self, id: &NoteId) -> Result<&Note> {
        note_by_id(self.store.state(), id)
            .with_context(|| format!("note not found: {}", id))
    }
}
