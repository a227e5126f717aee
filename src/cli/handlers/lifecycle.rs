//! Handlers for updates, pinning, trashing and purging.

use anyhow::{Result, bail};

use super::{Workspace, ensure_applied, label};
use crate::cli::{NoteArg, PurgeArgs, UpdateArgs};
use crate::domain::{NoteId, NoteUpdate};
use crate::state::Outcome;
use crate::state::selectors::trashed_notes;

pub fn handle_update(args: &UpdateArgs, ws: &mut Workspace) -> Result<()> {
    if args.title.is_none() && args.content.is_none() {
        bail!("nothing to update: pass --title and/or --content");
    }
    if let Some(title) = &args.title
        && title.trim().is_empty()
    {
        bail!("title cannot be empty");
    }

    let id = ws.resolve(&args.note)?;
    let note = ws.note(&id)?;
    if args.content.is_some() && note.is_encrypted() {
        bail!(
            "cannot update {}: note is encrypted; decrypt it first",
            label(note)
        );
    }

    let mut update = NoteUpdate::new();
    if let Some(title) = &args.title {
        update = update.title(title.trim());
    }
    if let Some(content) = &args.content {
        update = update.content(content.as_str());
    }

    let outcome = ws.store_mut().update(&id, update);
    ensure_applied(outcome, "update note")?;
    println!("Updated: {}", label(ws.note(&id)?));
    Ok(())
}

pub fn handle_pin(args: &NoteArg, ws: &mut Workspace) -> Result<()> {
    apply(ws, &args.note, "pin note", "Pinned", |ws, id| ws.store_mut().pin(id))
}

pub fn handle_unpin(args: &NoteArg, ws: &mut Workspace) -> Result<()> {
    apply(ws, &args.note, "unpin note", "Unpinned", |ws, id| ws.store_mut().unpin(id))
}

pub fn handle_rm(args: &NoteArg, ws: &mut Workspace) -> Result<()> {
    apply(ws, &args.note, "move note to trash", "Trashed", |ws, id| {
        ws.store_mut().delete(id)
    })
}

pub fn handle_restore(args: &NoteArg, ws: &mut Workspace) -> Result<()> {
    apply(ws, &args.note, "restore note", "Restored", |ws, id| {
        ws.store_mut().restore(id)
    })
}

pub fn handle_purge(args: &PurgeArgs, ws: &mut Workspace) -> Result<()> {
    if args.empty_trash {
        return empty_trash(ws);
    }
    let Some(identifier) = &args.note else {
        bail!("pass a note or --empty-trash");
    };

    let id = ws.resolve(identifier)?;
    let name = label(ws.note(&id)?);
    let outcome = ws.store_mut().permanently_delete(&id);
    ensure_applied(outcome, "purge note")?;
    println!("Purged: {}", name);
    Ok(())
}

/// Permanently deletes every trashed note. Encrypted notes are skipped.
fn empty_trash(ws: &mut Workspace) -> Result<()> {
    let targets: Vec<(NoteId, String)> = trashed_notes(ws.store().state())
        .into_iter()
        .map(|n| (n.id().clone(), label(n)))
        .collect();

    if targets.is_empty() {
        println!("Trash is empty.");
        return Ok(());
    }

    let mut purged = 0;
    for (id, name) in targets {
        match ws.store_mut().permanently_delete(&id) {
            Outcome::Applied => purged += 1,
            Outcome::Rejected(reason) => {
                eprintln!("Skipped: {} ({})", name, reason);
            }
        }
    }
    println!("Purged {} note(s).", purged);
    Ok(())
}

/// Resolves `identifier`, runs `op` and reports the result.
fn apply<F>(ws: &mut Workspace, identifier: &str, action: &str, done: &str, op: F) -> Result<()>
where
    F: FnOnce(&mut Workspace, &NoteId) -> Outcome,
{
    let id = ws.resolve(identifier)?;
    let outcome = op(ws, &id);
    ensure_applied(outcome, action)?;
    println!("{}: {}", done, label(ws.note(&id)?));
    Ok(())
}
