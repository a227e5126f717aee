//! New note command handler.

use anyhow::{Result, bail};

use super::show_edit::{EditorLauncher, edit_in_editor};
use super::{Workspace, label};
use crate::cli::NewArgs;
use crate::session::SessionConfig;
use crate::state::MAX_PINNED;

pub fn handle_new<E: EditorLauncher>(
    args: &NewArgs,
    ws: &mut Workspace,
    editor: &E,
    session: SessionConfig,
) -> Result<()> {
    let title = args.title.trim();
    if title.is_empty() {
        bail!("title cannot be empty");
    }

    let Some(id) = ws
        .store_mut()
        .create(title, args.content.as_str(), args.pinned, false)
    else {
        bail!("cannot create pinned note: pin limit reached ({MAX_PINNED} notes already pinned)");
    };

    println!("Created: {}", label(ws.note(&id)?));

    if args.edit {
        edit_in_editor(ws, &id, editor, session)?;
    }
    Ok(())
}
