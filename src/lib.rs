//! notekeep - rich-text notes with pinning, trash, version history and
//! password encryption

pub mod cli;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod session;
pub mod state;
pub mod storage;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        SystemEditor, Workspace, handle_check, handle_decrypt, handle_edit, handle_encrypt,
        handle_history, handle_insights, handle_list, handle_new, handle_pin, handle_prefs,
        handle_purge, handle_restore, handle_revert, handle_rm, handle_show, handle_strength,
        handle_unpin, handle_update,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    // Commands that never touch the note database
    match &cli.command {
        Command::Strength(args) => return handle_strength(args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(args.shell, &mut command, "notekeep", &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let data_dir = config.data_dir(cli.dir.as_ref());
    tracing::debug!(dir = %data_dir.display(), "opening workspace");
    let mut ws = Workspace::open(&data_dir)?;
    let editor = SystemEditor(&config);

    // Index repairs and partial work are saved even when the command fails
    let result = match &cli.command {
        Command::New(args) => handle_new(args, &mut ws, &editor, config.session()),
        Command::List(args) => handle_list(args, &ws),
        Command::Show(args) => handle_show(args, &ws),
        Command::Edit(args) => handle_edit(args, &mut ws, &editor, config.session()),
        Command::Update(args) => handle_update(args, &mut ws),
        Command::Pin(args) => handle_pin(args, &mut ws),
        Command::Unpin(args) => handle_unpin(args, &mut ws),
        Command::Rm(args) => handle_rm(args, &mut ws),
        Command::Restore(args) => handle_restore(args, &mut ws),
        Command::Purge(args) => handle_purge(args, &mut ws),
        Command::Encrypt(args) => handle_encrypt(args, &mut ws),
        Command::Decrypt(args) => handle_decrypt(args, &mut ws),
        Command::History(args) => handle_history(args, &ws),
        Command::Revert(args) => handle_revert(args, &mut ws),
        Command::Check(args) => handle_check(args, &ws),
        Command::Prefs(args) => handle_prefs(args, &mut ws),
        Command::Insights(args) => handle_insights(args, &ws),
        Command::Strength(_) | Command::Completions(_) => Ok(()),
    };

    ws.save()?;
    result
}
