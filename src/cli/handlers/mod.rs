//! Command handlers for the CLI.

mod check;
mod history;
mod insights;
mod lifecycle;
mod list;
mod new;
mod resolve;
mod secure;
mod show_edit;
mod workspace;

#[cfg(test)]
pub(crate) mod tests;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::cli::output::Output;
use crate::domain::Note;
use crate::state::{MAX_PINNED, Outcome, Rejection};

// Re-export public items
pub use check::{handle_check, handle_prefs};
pub use history::{handle_history, handle_revert};
pub use insights::handle_insights;
pub use lifecycle::{
    handle_pin, handle_purge, handle_restore, handle_rm, handle_unpin, handle_update,
};
pub use list::handle_list;
pub use new::handle_new;
pub use resolve::{ResolveResult, resolve_note};
pub use secure::{handle_decrypt, handle_encrypt, handle_strength};
pub use show_edit::{EditorLauncher, SystemEditor, handle_edit, handle_show};
pub use workspace::Workspace;

// ===========================================
// Shared Utilities
// ===========================================

/// Explains a rejection to the user.
pub(crate) fn rejection_message(rejection: Rejection) -> String {
    match rejection {
        Rejection::UnknownNote => "note no longer exists".to_string(),
        Rejection::Encrypted => "note is encrypted; decrypt it first".to_string(),
        Rejection::PinCapacity => format!("pin limit reached ({MAX_PINNED} notes already pinned)"),
        Rejection::Trashed => "note is in the trash; restore it first".to_string(),
        Rejection::UnknownVersion => "no such version".to_string(),
    }
}

/// Turns a rejected outcome into an error naming the attempted action.
pub(crate) fn ensure_applied(outcome: Outcome, action: &str) -> Result<()> {
    match outcome {
        Outcome::Applied => Ok(()),
        Outcome::Rejected(rejection) => {
            bail!("cannot {}: {}", action, rejection_message(rejection))
        }
    }
}

/// One-line label used in confirmations.
pub(crate) fn label(note: &Note) -> String {
    format!("{} [{}]", note.title(), note.id().prefix())
}

pub(crate) fn print_json<T: Serialize>(data: T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&Output::new(data))?);
    Ok(())
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
