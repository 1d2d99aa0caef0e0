//! Theme setting commands.

use crate::common::{CliResult, Context};
use clap::Subcommand;
use pocketdeck_core::{SettingsRepository, SqliteKvStore};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between dark and light
    Toggle,
}

pub fn run(ctx: &Context, action: ThemeAction) -> CliResult {
    let conn = ctx.open_db()?;
    let mut settings = SettingsRepository::load(SqliteKvStore::new(&conn))?;

    match action {
        ThemeAction::Show => println!("{}", settings.theme().as_str()),
        ThemeAction::Toggle => {
            let theme = settings.toggle_theme()?;
            println!("Theme: {}", theme.as_str());
        }
    }
    Ok(())
}
