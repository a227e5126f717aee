//! Version history handlers.

use anyhow::{Result, bail};

use super::{Workspace, ensure_applied, label, print_json, truncate_str};
use crate::cli::output::{OutputFormat, VersionListing};
use crate::cli::{HistoryArgs, RevertArgs};

pub fn handle_history(args: &HistoryArgs, ws: &Workspace) -> Result<()> {
    let id = ws.resolve(&args.note)?;
    let note = ws.note(&id)?;

    let versions: Vec<VersionListing> = note
        .versions()
        .iter()
        .enumerate()
        .map(|(index, version)| VersionListing::new(index, version))
        .collect();

    match args.format {
        OutputFormat::Human => {
            if versions.is_empty() {
                println!("No versions recorded for {}.", label(note));
                return Ok(());
            }
            println!("History of {} (0 = oldest)", label(note));
            println!();
            println!("{:>3}  {:<16}  {:<30}  {}", "#", "Saved", "Title", "Preview");
            for version in &versions {
                println!(
                    "{:>3}  {:<16}  {:<30}  {}",
                    version.index,
                    version.timestamp.format("%Y-%m-%d %H:%M"),
                    truncate_str(&version.title, 30),
                    version.preview
                );
            }
        }
        OutputFormat::Json => print_json(versions)?,
    }
    Ok(())
}

pub fn handle_revert(args: &RevertArgs, ws: &mut Workspace) -> Result<()> {
    let id = ws.resolve(&args.note)?;
    let available = ws.note(&id)?.versions().len();
    if args.version >= available {
        bail!(
            "no version {} ({} recorded; use `notekeep history` to list them)",
            args.version,
            available
        );
    }

    let outcome = ws.store_mut().revert_to(&id, args.version);
    ensure_applied(outcome, "revert note")?;
    println!("Reverted: {} to version {}", label(ws.note(&id)?), args.version);
    Ok(())
}
