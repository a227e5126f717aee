//! Index check and view preference handlers.

use anyhow::Result;

use super::{Workspace, print_json};
use crate::cli::output::{CheckListing, OutputFormat};
use crate::cli::{CheckArgs, PrefsArgs};
use crate::domain::NoteId;

/// Reports what the sync guard repaired while opening the workspace.
///
/// The repairs themselves are saved along with the command.
pub fn handle_check(args: &CheckArgs, ws: &Workspace) -> Result<()> {
    let report = ws.sync_report();

    match args.format {
        OutputFormat::Human => {
            if report.is_clean() {
                println!("Indices OK.");
                return Ok(());
            }
            let r = &report.reconcile;
            print_ids("Added to pinned index", &r.pinned_added);
            print_ids("Removed from pinned index", &r.pinned_removed);
            print_ids("Added to trash index", &r.trashed_added);
            print_ids("Removed from trash index", &r.trashed_removed);
            if r.duplicates_removed > 0 {
                println!("Duplicate index entries removed: {}", r.duplicates_removed);
            }
            print_ids("Pin flag re-asserted", &report.reasserted);
            println!();
            println!("{} correction(s) applied.", r.corrections() + report.reasserted.len());
        }
        OutputFormat::Json => print_json(CheckListing::from(report))?,
    }
    Ok(())
}

fn print_ids(heading: &str, ids: &[NoteId]) {
    if ids.is_empty() {
        return;
    }
    println!("{}:", heading);
    for id in ids {
        println!("  {}", id);
    }
}

/// Updates the stored view preferences, then prints them.
pub fn handle_prefs(args: &PrefsArgs, ws: &mut Workspace) -> Result<()> {
    if args.clear_filter {
        ws.store_mut().set_filter("");
    } else if let Some(filter) = &args.filter {
        ws.store_mut().set_filter(filter.as_str());
    }
    if let Some(sort_by) = args.sort {
        ws.store_mut().set_sort_by(sort_by);
    }
    if let Some(direction) = args.direction {
        ws.store_mut().set_sort_direction(direction);
    }

    let state = ws.store().state();
    let filter = if state.filter().is_empty() {
        "(none)"
    } else {
        state.filter()
    };
    println!("filter:    {}", filter);
    println!("sort:      {}", state.sort_by());
    println!("direction: {}", state.sort_direction());
    Ok(())
}
