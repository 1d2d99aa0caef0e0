//! Bookmark commands.

use crate::common::{resolve_id, resolve_ids, short_id, CliResult, Context};
use clap::Subcommand;
use pocketdeck_core::{Bookmark, BookmarkRepository, SqliteKvStore};

#[derive(Subcommand)]
pub enum BookmarkAction {
    /// Save a link; a blank URL is ignored
    Add {
        url: String,
        /// Optional description shown instead of the URL
        #[arg(long)]
        desc: Option<String>,
    },
    /// List bookmarks in display order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Replace URL and description
    Edit {
        id: String,
        url: String,
        #[arg(long)]
        desc: Option<String>,
    },
    /// Delete a bookmark
    Rm { id: String },
    /// Reorder bookmarks; pass every id in the new order
    Reorder {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

pub fn run(ctx: &Context, action: BookmarkAction) -> CliResult {
    let conn = ctx.open_db()?;
    let mut bookmarks = BookmarkRepository::load(SqliteKvStore::new(&conn))?;
    let known = || {
        bookmarks
            .bookmarks()
            .iter()
            .map(|bookmark| bookmark.id)
            .collect::<Vec<_>>()
    };

    match action {
        BookmarkAction::Add { url, desc } => {
            match bookmarks.add_bookmark(&url, desc.as_deref())? {
                Some(id) => println!("Bookmark added: {}", short_id(id)),
                None => println!("Nothing to add"),
            }
        }
        BookmarkAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(bookmarks.bookmarks())?);
            } else if bookmarks.bookmarks().is_empty() {
                println!("No bookmarks");
            } else {
                for bookmark in bookmarks.bookmarks() {
                    println!("{}", format_bookmark(bookmark));
                }
            }
        }
        BookmarkAction::Edit { id, url, desc } => {
            let id = resolve_id(&id, known())?;
            bookmarks.edit(id, &url, desc.as_deref())?;
            println!("Bookmark updated: {}", short_id(id));
        }
        BookmarkAction::Rm { id } => {
            let id = resolve_id(&id, known())?;
            bookmarks.remove(id)?;
            println!("Bookmark deleted: {}", short_id(id));
        }
        BookmarkAction::Reorder { ids } => {
            let ids = resolve_ids(&ids, known())?;
            bookmarks.reorder(&ids)?;
            println!("Order saved");
        }
    }
    Ok(())
}

fn format_bookmark(bookmark: &Bookmark) -> String {
    match bookmark.description() {
        Some(desc) => format!("{}  {desc}  <{}>", short_id(bookmark.id), bookmark.url),
        None => format!("{}  {}", short_id(bookmark.id), bookmark.url),
    }
}
