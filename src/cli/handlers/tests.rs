use super::*;
use crate::cli::output::OutputFormat;
use crate::cli::{EditArgs, NewArgs, NoteArg, PasswordArgs, PrefsArgs, PurgeArgs, RevertArgs, UpdateArgs};
use crate::domain::{Note, NoteId};
use crate::session::SessionConfig;
use crate::state::{CollectionState, SortBy, SortDirection};
use crate::storage::{NoteRepository, SqliteStore};
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

// Test helpers
fn test_note_id(suffix: &str) -> NoteId {
    format!("01HQ3K5M7NXJK4QZPW8V2R6T{}", suffix)
        .parse()
        .unwrap()
}

fn test_datetime() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn sample_note(suffix: &str, title: &str) -> Note {
    Note::builder(test_note_id(suffix), title, "<p>body</p>", test_datetime()).build()
}

fn workspace_with(state: CollectionState) -> Workspace {
    let mut db = SqliteStore::open_in_memory().unwrap();
    db.save_state(&state).unwrap();
    Workspace::from_db(db).unwrap()
}

fn empty_workspace() -> Workspace {
    workspace_with(CollectionState::new())
}

fn note_arg(note: &str) -> NoteArg {
    NoteArg {
        note: note.to_string(),
    }
}

// ===========================================
// Shared utility tests
// ===========================================

#[test]
fn truncate_str_keeps_short_strings() {
    assert_eq!(truncate_str("short", 10), "short");
}

#[test]
fn truncate_str_adds_ellipsis() {
    assert_eq!(truncate_str("a long title here", 6), "a lon…");
}

#[test]
fn ensure_applied_passes_applied_outcome() {
    assert!(ensure_applied(Outcome::Applied, "pin note").is_ok());
}

#[test]
fn ensure_applied_names_action_and_reason() {
    let err = ensure_applied(Outcome::Rejected(Rejection::PinCapacity), "pin note").unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("cannot pin note"));
    assert!(msg.contains("pin limit reached"));
}

#[test]
fn label_uses_title_and_prefix() {
    let note = sample_note("9A", "Groceries");
    assert_eq!(label(&note), "Groceries [01HQ3K5M7N]");
}

// ===========================================
// resolve_note tests
// ===========================================

mod resolve_note_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state() -> CollectionState {
        CollectionState::from_parts(
            vec![
                sample_note("9A", "API Design"),
                sample_note("9B", "api design"),
                sample_note("9C", "Shopping"),
            ],
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn resolve_by_full_id() {
        let state = state();
        match resolve_note(&state, "01HQ3K5M7NXJK4QZPW8V2R6T9C") {
            ResolveResult::Unique(note) => assert_eq!(note.title(), "Shopping"),
            other => panic!("expected unique, got {:?}", other),
        }
    }

    #[test]
    fn resolve_by_id_prefix_ambiguous() {
        let state = state();
        match resolve_note(&state, "01HQ3K5M7N") {
            ResolveResult::Ambiguous(notes) => assert_eq!(notes.len(), 3),
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn resolve_by_title_ignores_case() {
        let state = state();
        match resolve_note(&state, "SHOPPING") {
            ResolveResult::Unique(note) => assert_eq!(note.id(), &test_note_id("9C")),
            other => panic!("expected unique, got {:?}", other),
        }
    }

    #[test]
    fn resolve_by_title_ambiguous() {
        let state = state();
        assert!(matches!(
            resolve_note(&state, "api design"),
            ResolveResult::Ambiguous(notes) if notes.len() == 2
        ));
    }

    #[test]
    fn resolve_not_found() {
        let state = state();
        assert!(matches!(resolve_note(&state, "nope"), ResolveResult::NotFound));
    }
}

// ===========================================
// Workspace tests
// ===========================================

#[test]
fn workspace_repairs_drifted_indices_on_open() {
    let pinned = Note::builder(test_note_id("9A"), "Pinned", "", test_datetime())
        .pinned(true)
        .build();
    let ws = workspace_with(CollectionState::from_parts(vec![pinned], Vec::new(), Vec::new()));

    assert!(!ws.sync_report().is_clean());
    assert!(ws.is_dirty());
    assert_eq!(ws.store().state().pinned_ids(), &[test_note_id("9A")]);
}

#[test]
fn workspace_clean_open_is_not_dirty() {
    let ws = workspace_with(CollectionState::from_parts(
        vec![sample_note("9A", "Plain")],
        Vec::new(),
        Vec::new(),
    ));
    assert!(ws.sync_report().is_clean());
    assert!(!ws.is_dirty());
}

#[test]
fn workspace_save_persists_changes() {
    let mut ws = empty_workspace();
    let id = ws.store_mut().create("Saved", "", false, false).unwrap();
    ws.save().unwrap();
    assert!(!ws.is_dirty());

    let reloaded = ws.db().load_state().unwrap();
    assert!(reloaded.contains(&id));
}

#[test]
fn workspace_resolve_reports_missing_note() {
    let ws = empty_workspace();
    let err = ws.resolve("ghost").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

// ===========================================
// Lifecycle handler tests
// ===========================================

#[test]
fn handle_update_requires_a_field() {
    let mut ws = workspace_with(CollectionState::from_parts(
        vec![sample_note("9A", "Draft")],
        Vec::new(),
        Vec::new(),
    ));
    let args = UpdateArgs {
        note: "Draft".to_string(),
        title: None,
        content: None,
    };
    assert!(handle_update(&args, &mut ws).is_err());
    assert!(!ws.is_dirty());
}

#[test]
fn handle_update_records_version() {
    let mut ws = workspace_with(CollectionState::from_parts(
        vec![sample_note("9A", "Draft")],
        Vec::new(),
        Vec::new(),
    ));
    let args = UpdateArgs {
        note: "Draft".to_string(),
        title: Some("Final".to_string()),
        content: None,
    };
    handle_update(&args, &mut ws).unwrap();

    let note = ws.note(&test_note_id("9A")).unwrap();
    assert_eq!(note.title(), "Final");
    assert_eq!(note.versions().len(), 1);
    assert_eq!(note.versions().latest().unwrap().title(), "Draft");
}

#[test]
fn handle_pin_fails_at_capacity() {
    let mut ws = empty_workspace();
    for i in 0..5 {
        ws.store_mut().create(format!("Pinned {i}"), "", true, false).unwrap();
    }
    ws.store_mut().create("Sixth", "", false, false).unwrap();

    let err = handle_pin(&note_arg("Sixth"), &mut ws).unwrap_err();
    assert!(err.to_string().contains("pin limit reached"));
}

#[test]
fn handle_rm_then_restore() {
    let mut ws = workspace_with(CollectionState::from_parts(
        vec![sample_note("9A", "Old")],
        Vec::new(),
        Vec::new(),
    ));
    handle_rm(&note_arg("Old"), &mut ws).unwrap();
    assert!(ws.note(&test_note_id("9A")).unwrap().is_trashed());

    handle_restore(&note_arg("Old"), &mut ws).unwrap();
    assert!(!ws.note(&test_note_id("9A")).unwrap().is_trashed());
    assert!(ws.store().state().trashed_ids().is_empty());
}

#[test]
fn handle_purge_empty_trash_skips_nothing_when_plain() {
    let mut ws = empty_workspace();
    let keep = ws.store_mut().create("Keep", "", false, false).unwrap();
    let gone = ws.store_mut().create("Gone", "", false, false).unwrap();
    ws.store_mut().delete(&gone);

    let args = PurgeArgs {
        note: None,
        empty_trash: true,
    };
    handle_purge(&args, &mut ws).unwrap();

    assert!(ws.store().note(&gone).is_none());
    assert!(ws.store().note(&keep).is_some());
}

// ===========================================
// Encryption and history handler tests
// ===========================================

#[test]
fn handle_encrypt_then_decrypt() {
    let mut ws = workspace_with(CollectionState::from_parts(
        vec![sample_note("9A", "Secret")],
        Vec::new(),
        Vec::new(),
    ));
    let args = PasswordArgs {
        note: "Secret".to_string(),
        password: "Corr3ct-Horse".to_string(),
    };

    handle_encrypt(&args, &mut ws).unwrap();
    assert!(ws.note(&test_note_id("9A")).unwrap().is_encrypted());

    handle_decrypt(&args, &mut ws).unwrap();
    let note = ws.note(&test_note_id("9A")).unwrap();
    assert!(!note.is_encrypted());
    assert_eq!(note.content(), "<p>body</p>");
}

#[test]
fn handle_decrypt_wrong_password_keeps_note_encrypted() {
    let mut ws = workspace_with(CollectionState::from_parts(
        vec![sample_note("9A", "Secret")],
        Vec::new(),
        Vec::new(),
    ));
    let good = PasswordArgs {
        note: "Secret".to_string(),
        password: "right".to_string(),
    };
    handle_encrypt(&good, &mut ws).unwrap();

    let bad = PasswordArgs {
        note: "Secret".to_string(),
        password: "wrong".to_string(),
    };
    let err = handle_decrypt(&bad, &mut ws).unwrap_err();
    assert!(format!("{:#}", err).contains("password may be incorrect"));
    assert!(ws.note(&test_note_id("9A")).unwrap().is_encrypted());
}

#[test]
fn handle_revert_restores_older_version() {
    let mut ws = empty_workspace();
    let id = ws.store_mut().create("Title", "first", false, false).unwrap();
    ws.store_mut()
        .update(&id, crate::domain::NoteUpdate::new().content("second"));

    let args = RevertArgs {
        note: "Title".to_string(),
        version: 0,
    };
    handle_revert(&args, &mut ws).unwrap();
    assert_eq!(ws.note(&id).unwrap().content(), "first");
}

#[test]
fn handle_revert_rejects_unknown_version() {
    let mut ws = empty_workspace();
    ws.store_mut().create("Title", "first", false, false).unwrap();
    let args = RevertArgs {
        note: "Title".to_string(),
        version: 3,
    };
    let err = handle_revert(&args, &mut ws).unwrap_err();
    assert!(err.to_string().contains("no version 3"));
}

#[test]
fn handle_prefs_updates_view() {
    let mut ws = empty_workspace();
    let args = PrefsArgs {
        filter: Some("work".to_string()),
        clear_filter: false,
        sort: Some(SortBy::Title),
        direction: Some(SortDirection::Asc),
        reverse: false,
    };
    handle_prefs(&args, &mut ws).unwrap();

    let state = ws.store().state();
    assert_eq!(state.filter(), "work");
    assert_eq!(state.sort_by(), SortBy::Title);
    assert_eq!(state.sort_direction(), SortDirection::Asc);
}

// ===========================================
// New / edit handler tests
// ===========================================

mod editor_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records the opened path and optionally replaces the file contents.
    struct MockEditor {
        opened: RefCell<Option<PathBuf>>,
        write: Option<String>,
        should_fail: bool,
    }

    impl MockEditor {
        fn untouched() -> Self {
            Self {
                opened: RefCell::new(None),
                write: None,
                should_fail: false,
            }
        }

        fn writing(content: &str) -> Self {
            Self {
                write: Some(content.to_string()),
                ..Self::untouched()
            }
        }

        fn failing() -> Self {
            Self {
                should_fail: true,
                ..Self::untouched()
            }
        }

        fn opened_path(&self) -> Option<PathBuf> {
            self.opened.borrow().clone()
        }
    }

    impl EditorLauncher for MockEditor {
        fn open(&self, path: &Path) -> Result<()> {
            *self.opened.borrow_mut() = Some(path.to_path_buf());
            if self.should_fail {
                bail!("editor failed to open");
            }
            if let Some(content) = &self.write {
                std::fs::write(path, content)?;
            }
            Ok(())
        }
    }

    fn new_args(title: &str, edit: bool) -> NewArgs {
        NewArgs {
            title: title.to_string(),
            content: String::new(),
            pinned: false,
            edit,
        }
    }

    #[test]
    fn handle_new_creates_note() {
        let mut ws = empty_workspace();
        let editor = MockEditor::untouched();
        handle_new(&new_args("Fresh", false), &mut ws, &editor, SessionConfig::default()).unwrap();

        assert_eq!(ws.store().state().len(), 1);
        assert!(editor.opened_path().is_none());
    }

    #[test]
    fn handle_new_rejects_blank_title() {
        let mut ws = empty_workspace();
        let editor = MockEditor::untouched();
        let err = handle_new(&new_args("   ", false), &mut ws, &editor, SessionConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("title cannot be empty"));
    }

    #[test]
    fn handle_new_with_edit_saves_editor_content() {
        let mut ws = empty_workspace();
        let editor = MockEditor::writing("<p>typed</p>\n");
        handle_new(&new_args("Fresh", true), &mut ws, &editor, SessionConfig::default()).unwrap();

        let note = &ws.store().state().notes()[0];
        assert_eq!(note.content(), "<p>typed</p>");
        let path = editor.opened_path().unwrap();
        assert!(path.to_string_lossy().ends_with(".html"));
    }

    #[test]
    fn handle_edit_without_changes_records_nothing() {
        let mut ws = workspace_with(CollectionState::from_parts(
            vec![sample_note("9A", "Draft")],
            Vec::new(),
            Vec::new(),
        ));
        let editor = MockEditor::untouched();
        let args = EditArgs {
            note: "Draft".to_string(),
        };
        handle_edit(&args, &mut ws, &editor, SessionConfig::default()).unwrap();

        assert!(ws.note(&test_note_id("9A")).unwrap().versions().is_empty());
    }

    #[test]
    fn handle_edit_refuses_encrypted_note() {
        let encrypted = Note::builder(test_note_id("9A"), "Locked", "nk1:abc", test_datetime())
            .encrypted(true)
            .build();
        let mut ws = workspace_with(CollectionState::from_parts(vec![encrypted], Vec::new(), Vec::new()));
        let editor = MockEditor::untouched();
        let args = EditArgs {
            note: "Locked".to_string(),
        };
        let err = handle_edit(&args, &mut ws, &editor, SessionConfig::default()).unwrap_err();
        assert!(err.to_string().contains("encrypted"));
        assert!(editor.opened_path().is_none());
    }

    #[test]
    fn handle_edit_propagates_editor_failure() {
        let mut ws = workspace_with(CollectionState::from_parts(
            vec![sample_note("9A", "Draft")],
            Vec::new(),
            Vec::new(),
        ));
        let editor = MockEditor::failing();
        let args = EditArgs {
            note: "Draft".to_string(),
        };
        let err = handle_edit(&args, &mut ws, &editor, SessionConfig::default()).unwrap_err();
        assert!(err.to_string().contains("editor failed"));
        assert_eq!(ws.note(&test_note_id("9A")).unwrap().content(), "<p>body</p>");
    }
}

#[test]
fn handle_check_and_show_accept_json() {
    let ws = workspace_with(CollectionState::from_parts(
        vec![sample_note("9A", "Draft")],
        Vec::new(),
        Vec::new(),
    ));
    let check = crate::cli::CheckArgs {
        format: OutputFormat::Json,
    };
    handle_check(&check, &ws).unwrap();

    let show = crate::cli::ShowArgs {
        note: "Draft".to_string(),
        raw: false,
        password: None,
        format: OutputFormat::Json,
    };
    handle_show(&show, &ws).unwrap();
}
