//! Show and Edit command handlers.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use super::{Workspace, ensure_applied, label, print_json};
use crate::cli::config::Config;
use crate::cli::output::{NoteDetail, NoteListing, OutputFormat};
use crate::cli::{EditArgs, ShowArgs};
use crate::domain::NoteId;
use crate::infra::{AesCipher, plain_text};
use crate::session::{EditorSession, SessionConfig, SessionEvent};
use crate::state::peek_with_password;

pub fn handle_show(args: &ShowArgs, ws: &Workspace) -> Result<()> {
    let id = ws.resolve(&args.note)?;
    let note = ws.note(&id)?;

    let markup = match (note.is_encrypted(), &args.password) {
        (false, _) => Some(note.content().to_string()),
        (true, Some(password)) => Some(
            peek_with_password(ws.store(), &AesCipher, &id, password)
                .context("failed to read encrypted note")?,
        ),
        (true, None) => None,
    };
    let content = markup.map(|m| if args.raw { m } else { plain_text(&m) });

    match args.format {
        OutputFormat::Human => {
            println!("# {}", note.title());
            println!();
            println!(
                "ID: {}  Created: {}  Modified: {}",
                note.id().prefix(),
                note.created().format("%Y-%m-%d %H:%M"),
                note.last_modified().format("%Y-%m-%d %H:%M")
            );

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
            if !flags.is_empty() {
                println!("Flags: {}", flags.join(", "));
            }
            if !note.versions().is_empty() {
                println!("Versions: {}", note.versions().len());
            }
            println!();

            match content {
                Some(text) if !text.is_empty() => println!("{}", text),
                Some(_) => {}
                None => println!("[encrypted; pass --password to read]"),
            }
        }
        OutputFormat::Json => {
            print_json(NoteDetail {
                listing: NoteListing::from(note),
                content,
                version_count: note.versions().len(),
            })?;
        }
    }
    Ok(())
}

/// Launches an editor on a file and waits for it (mockable in tests).
pub trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Runs the editor configured by [`Config::editor`].
pub struct SystemEditor<'a>(pub &'a Config);

impl EditorLauncher for SystemEditor<'_> {
    fn open(&self, path: &Path) -> Result<()> {
        open_in_editor(path, self.0)
    }
}

/// Opens a file in the user's configured editor.
pub(crate) fn open_in_editor(path: &Path, config: &Config) -> Result<()> {
    let editor = config.editor();

    // Parse editor command (may include args like "code --wait")
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let Some((cmd, args)) = parts.split_first() else {
        bail!("editor command is empty");
    };

    let status = Command::new(cmd)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;

    if !status.success() {
        bail!("editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}

/// Round-trips a note's content through the editor and saves the result
/// through an editing session.
pub(crate) fn edit_in_editor<E: EditorLauncher>(
    ws: &mut Workspace,
    id: &NoteId,
    editor: &E,
    config: SessionConfig,
) -> Result<()> {
    let note = ws.note(id)?;
    if note.is_encrypted() {
        bail!("cannot edit {}: note is encrypted; decrypt it first", label(note));
    }
    if note.is_trashed() {
        bail!("cannot edit {}: note is in the trash; restore it first", label(note));
    }
    let original = note.content().to_string();

    let mut file = tempfile::Builder::new()
        .prefix("notekeep-")
        .suffix(".html")
        .tempfile()
        .context("failed to create temporary file")?;
    file.write_all(original.as_bytes())
        .and_then(|_| file.flush())
        .context("failed to write temporary file")?;

    editor.open(file.path())?;

    let mut edited = std::fs::read_to_string(file.path())
        .with_context(|| format!("failed to read {}", file.path().display()))?;
    // editors append a final newline the note never had
    if !original.ends_with('\n') {
        let trimmed = edited.trim_end_matches(['\n', '\r']).len();
        edited.truncate(trimmed);
    }

    let mut session = EditorSession::open(ws.store(), id, config)
        .with_context(|| format!("note not found: {}", id))?;
    session.edit_content(edited, Utc::now());

    match session.close(ws.store_mut()) {
        Some(SessionEvent::Saved(_)) => println!("Edited: {}", label(ws.note(id)?)),
        Some(SessionEvent::SaveRejected(_, outcome)) => ensure_applied(outcome, "save note")?,
        _ => println!("No changes: {}", label(ws.note(id)?)),
    }
    Ok(())
}

pub fn handle_edit<E: EditorLauncher>(
    args: &EditArgs,
    ws: &mut Workspace,
    editor: &E,
    config: SessionConfig,
) -> Result<()> {
    let id = ws.resolve(&args.note)?;
    edit_in_editor(ws, &id, editor, config)
}
