//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::state::{SortBy, SortDirection};
use output::OutputFormat;

/// notekeep - rich-text notes with pinning, trash, history and encryption
#[derive(Parser, Debug)]
#[command(name = "notekeep", version, about, long_about = None)]
pub struct Cli {
    /// Data directory holding the note database (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// List notes
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a note
    Show(ShowArgs),

    /// Edit a note's content in your editor
    Edit(EditArgs),

    /// Change a note's title or content
    Update(UpdateArgs),

    /// Pin a note (at most 5)
    Pin(NoteArg),

    /// Unpin a note
    Unpin(NoteArg),

    /// Move a note to the trash
    Rm(NoteArg),

    /// Take a note out of the trash
    Restore(NoteArg),

    /// Delete a note for good
    Purge(PurgeArgs),

    /// Encrypt a note's content with a password
    Encrypt(PasswordArgs),

    /// Decrypt a note's content
    Decrypt(PasswordArgs),

    /// List a note's saved versions
    History(HistoryArgs),

    /// Restore a note's title and content from a saved version
    Revert(RevertArgs),

    /// Check and repair the pinned/trashed indices
    Check(CheckArgs),

    /// Show or change the default filter and sort order
    Prefs(PrefsArgs),

    /// Word count, key terms and summary of a note
    Insights(InsightsArgs),

    /// Rate a password
    Strength(StrengthArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// A single note identifier: full ID, ID prefix or exact title
#[derive(Args, Debug)]
pub struct NoteArg {
    /// Note ID, ID prefix or title
    pub note: String,
}

/// Arguments for the `new` command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Title of the new note
    pub title: String,

    /// Initial content (markup)
    #[arg(short, long, default_value = "")]
    pub content: String,

    /// Pin the note on creation
    #[arg(short, long)]
    pub pinned: bool,

    /// Open the note in your editor after creating it
    #[arg(short, long)]
    pub edit: bool,
}

/// Arguments for the `ls` (list) command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show only pinned notes
    #[arg(short, long, conflicts_with_all = ["trash", "all"])]
    pub pinned: bool,

    /// Show only notes in the trash
    #[arg(short, long, conflicts_with = "all")]
    pub trash: bool,

    /// Show every note, including trashed ones
    #[arg(short, long)]
    pub all: bool,

    /// Case-insensitive text filter (defaults to the saved preference)
    #[arg(short = 'F', long)]
    pub filter: Option<String>,

    /// Sort key: lastModified, created or title
    #[arg(short, long)]
    pub sort: Option<SortBy>,

    /// Sort direction: asc or desc
    #[arg(short = 'r', long)]
    pub direction: Option<SortDirection>,

    /// Flip the sort direction that would otherwise apply
    #[arg(short = 'R', long)]
    pub reverse: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Print the stored markup instead of plain text
    #[arg(long)]
    pub raw: bool,

    /// Password for reading an encrypted note (nothing is stored)
    #[arg(long, env = "NOTEKEEP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Note ID, ID prefix or title
    pub note: String,
}

/// Arguments for the `update` command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New content (markup)
    #[arg(short, long)]
    pub content: Option<String>,
}

/// Arguments for the `purge` command
#[derive(Args, Debug)]
pub struct PurgeArgs {
    /// Note ID, ID prefix or title (omit with --empty-trash)
    #[arg(required_unless_present = "empty_trash")]
    pub note: Option<String>,

    /// Purge every note in the trash
    #[arg(long, conflicts_with = "note")]
    pub empty_trash: bool,
}

/// Arguments for the `encrypt` and `decrypt` commands
#[derive(Args, Debug)]
pub struct PasswordArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Password
    #[arg(short, long, env = "NOTEKEEP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the `history` command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `revert` command
#[derive(Args, Debug)]
pub struct RevertArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Version number as shown by `history` (0 is the oldest)
    pub version: usize,
}

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `prefs` command
#[derive(Args, Debug)]
pub struct PrefsArgs {
    /// Default text filter
    #[arg(short = 'F', long, conflicts_with = "clear_filter")]
    pub filter: Option<String>,

    /// Clear the default filter
    #[arg(long)]
    pub clear_filter: bool,

    /// Default sort key
    #[arg(short, long)]
    pub sort: Option<SortBy>,

    /// Default sort direction
    #[arg(short = 'r', long)]
    pub direction: Option<SortDirection>,

    /// Flip the sort direction that would otherwise apply
    #[arg(short = 'R', long)]
    pub reverse: bool,
}

/// Arguments for the `insights` command
#[derive(Args, Debug)]
pub struct InsightsArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `strength` command
#[derive(Args, Debug)]
pub struct StrengthArgs {
    /// Password to rate
    pub password: String,
}

/// Arguments for the `completions` command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
