//! Notes commands.

use crate::common::{resolve_id, resolve_ids, short_id, CliResult, Context};
use clap::Subcommand;
use pocketdeck_core::{NoteRepository, SqliteKvStore};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Add a note; blank text is ignored
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List notes in display order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Replace the note text as given
    Edit {
        id: String,
        /// New text, stored verbatim
        text: String,
    },
    /// Delete a note
    Rm { id: String },
    /// Reorder notes; pass every id in the new order
    Reorder {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

pub fn run(ctx: &Context, action: NoteAction) -> CliResult {
    let conn = ctx.open_db()?;
    let mut notes = NoteRepository::load(SqliteKvStore::new(&conn))?;
    let known = || notes.notes().iter().map(|note| note.id).collect::<Vec<_>>();

    match action {
        NoteAction::Add { text } => match notes.add_note(&text.join(" "))? {
            Some(id) => println!("Note added: {}", short_id(id)),
            None => println!("Nothing to add"),
        },
        NoteAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(notes.notes())?);
            } else if notes.notes().is_empty() {
                println!("No notes");
            } else {
                for note in notes.notes() {
                    println!("{}  {}", short_id(note.id), note.text);
                }
            }
        }
        NoteAction::Edit { id, text } => {
            let id = resolve_id(&id, known())?;
            notes.edit_text(id, &text)?;
            println!("Note updated: {}", short_id(id));
        }
        NoteAction::Rm { id } => {
            let id = resolve_id(&id, known())?;
            notes.remove(id)?;
            println!("Note deleted: {}", short_id(id));
        }
        NoteAction::Reorder { ids } => {
            let ids = resolve_ids(&ids, known())?;
            notes.reorder(&ids)?;
            println!("Order saved");
        }
    }
    Ok(())
}
