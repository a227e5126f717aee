//! List command handler.

use anyhow::Result;

use super::{Workspace, print_json, truncate_str};
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, OutputFormat};
use crate::domain::Note;
use crate::state::selectors::{active_notes, all_notes, filtered_and_sorted, pinned_notes, trashed_notes};

pub fn handle_list(args: &ListArgs, ws: &Workspace) -> Result<()> {
    let state = ws.store().state();

    // 1. Pick the view
    let source: Vec<&Note> = if args.pinned {
        pinned_notes(state)
    } else if args.trash {
        trashed_notes(state)
    } else if args.all {
        all_notes(state)
    } else {
        active_notes(state)
    };

    // 2. Filter and sort, falling back to the stored preferences
    let filter = args.filter.as_deref().unwrap_or(state.filter());
    let sort_by = args.sort.unwrap_or(state.sort_by());
    let mut direction = args.direction.unwrap_or(state.sort_direction());
    if args.reverse {
        direction = direction.toggled();
    }
    let notes = filtered_and_sorted(&source, filter, sort_by, direction);

    // 3. Output based on format
    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                println!("{:<10}  {:<50}  {:>10}  {}", "ID", "Title", "Modified", "Flags");
                println!(
                    "{:<10}  {:<50}  {:>10}  {}",
                    "----------",
                    "--------------------------------------------------",
                    "----------",
                    "-----"
                );

                for note in &notes {
                    let title = truncate_str(note.title(), 50);
                    let modified = note.last_modified().format("%Y-%m-%d").to_string();
                    println!(
                        "{:<10}  {:<50}  {:>10}  {}",
                        note.id().prefix(),
                        title,
                        modified,
                        flags(note)
                    );
                }

                println!();
                println!("{} note(s)", notes.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|n| NoteListing::from(*n)).collect();
            print_json(listings)?;
        }
    }

    Ok(())
}

/// Compact flag column: P(inned), E(ncrypted), T(rashed).
fn flags(note: &Note) -> String {
    let mut out = String::new();
    if note.is_pinned() {
        out.push('P');
    }
    if note.is_encrypted() {
        out.push('E');
    }
    if note.is_trashed() {
        out.push('T');
    }
    out
}
