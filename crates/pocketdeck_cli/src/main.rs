//! PocketDeck terminal front end.
//!
//! # Responsibility
//! - Turn subcommands into repository operations (the "view" layer).
//! - Host the reminder/alarm pollers for `run`.
//! - Provide console stand-ins for notifications, sound and the popup.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod common;
mod devices;

use common::Context;

#[derive(Parser)]
#[command(name = "pocketdeck", version, about = "To-dos, notes, bookmarks and alarms")]
struct Cli {
    /// Directory holding the store file and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// To-do list
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Notes
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Bookmarks
    Bookmark {
        #[command(subcommand)]
        action: commands::bookmark::BookmarkAction,
    },
    /// Alarms
    Alarm {
        #[command(subcommand)]
        action: commands::alarm::AlarmAction,
    },
    /// Light/dark theme setting
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Offline cache for the app shell
    Cache(commands::cache::CacheArgs),
    /// Run reminder and alarm pollers until Ctrl-C
    Run(commands::run::RunArgs),
    /// Print core version
    Version,
}

fn main() {
    let cli = Cli::parse();
    let context = match Context::new(cli.data_dir, cli.log_level.as_deref()) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Task { action } => commands::task::run(&context, action),
        Commands::Note { action } => commands::note::run(&context, action),
        Commands::Bookmark { action } => commands::bookmark::run(&context, action),
        Commands::Alarm { action } => commands::alarm::run(&context, action),
        Commands::Theme { action } => commands::theme::run(&context, action),
        Commands::Cache(args) => commands::cache::run(&context, args),
        Commands::Run(args) => commands::run::run(&context, args),
        Commands::Version => {
            println!("pocketdeck_core {}", pocketdeck_core::core_version());
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!("event=cli_command module=cli status=error");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
