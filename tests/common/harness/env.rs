//! Isolated test environment with temp directory.

use super::{NotekeepCommand, TestNote};
use notekeep::domain::NoteId;
use notekeep::state::CollectionState;
use notekeep::storage::{DB_FILE, NoteRepository, SqliteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary data directory.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Provides methods for seeding the note database directly.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the data directory
    data_dir: PathBuf,
    /// Config file location (absent unless written), so no real config leaks in
    config_file: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        let config_file = temp_dir.path().join("config.toml");
        Self {
            _temp_dir: temp_dir,
            data_dir,
            config_file,
        }
    }

    /// Returns the path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the config file path used by [`TestEnv::cmd`].
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Returns the path of the note database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    /// Writes the isolated config file.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(&self.config_file, contents).expect("Failed to write config");
    }

    /// Seeds the database with notes whose indices agree with their flags.
    pub fn add_notes(&self, notes: &[&TestNote]) {
        let pinned = notes
            .iter()
            .map(|n| n.to_note())
            .filter(|n| n.is_pinned() && !n.is_trashed())
            .map(|n| n.id().clone())
            .collect();
        let trashed = notes
            .iter()
            .map(|n| n.to_note())
            .filter(|n| n.is_trashed())
            .map(|n| n.id().clone())
            .collect();
        self.seed_raw(notes, pinned, trashed);
    }

    /// Seeds the database with explicit indices, drift included.
    pub fn seed_raw(&self, notes: &[&TestNote], pinned: Vec<NoteId>, trashed: Vec<NoteId>) {
        let state = CollectionState::from_parts(
            notes.iter().map(|n| n.to_note()).collect(),
            pinned,
            trashed,
        );
        let mut db = SqliteStore::open(&self.db_path()).expect("Failed to open database");
        db.save_state(&state).expect("Failed to seed database");
    }

    /// Reads the current state straight from the database.
    pub fn load_state(&self) -> CollectionState {
        let db = SqliteStore::open(&self.db_path()).expect("Failed to open database");
        db.load_state().expect("Failed to load state")
    }

    /// Creates a NotekeepCommand configured for this test environment.
    pub fn cmd(&self) -> NotekeepCommand {
        NotekeepCommand::new()
            .dir(&self.data_dir)
            .config_file(&self.config_file)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.data_dir().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_db_path() {
        let env = TestEnv::new();
        assert!(env.db_path().ends_with(DB_FILE));
        assert!(env.db_path().starts_with(env.data_dir()));
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let args = env.cmd().get_args().to_vec();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.data_dir().to_string_lossy());
    }

    #[test]
    fn test_env_add_notes_builds_consistent_indices() {
        let env = TestEnv::new();
        let pinned = TestNote::new("Pinned").pinned();
        let trashed = TestNote::new("Trashed").trashed();
        env.add_notes(&[&pinned, &trashed]);

        let state = env.load_state();
        assert_eq!(state.len(), 2);
        assert_eq!(state.pinned_ids(), std::slice::from_ref(pinned.note_id()));
        assert_eq!(state.trashed_ids(), std::slice::from_ref(trashed.note_id()));
    }
}
