//! Bookmark repository.

use super::collection::{Collection, Record, RepoResult};
use crate::config::BOOKMARKS_KEY;
use crate::model::bookmark::{Bookmark, BookmarkId};
use crate::model::{non_empty, EntityId};
use crate::store::KeyValueStore;
use log::{debug, info};

impl Record for Bookmark {
    const STORE_KEY: &'static str = BOOKMARKS_KEY;

    fn id(&self) -> EntityId {
        self.id
    }
}

pub struct BookmarkRepository<S> {
    bookmarks: Collection<Bookmark, S>,
}

impl<S: KeyValueStore> BookmarkRepository<S> {
    pub fn load(store: S) -> RepoResult<Self> {
        Ok(Self {
            bookmarks: Collection::load(store)?,
        })
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        self.bookmarks.items()
    }

    pub fn get(&self, id: BookmarkId) -> Option<&Bookmark> {
        self.bookmarks.get(id)
    }

    /// Appends a bookmark. A blank URL is ignored.
    pub fn add_bookmark(&mut self, url: &str, desc: Option<&str>) -> RepoResult<Option<BookmarkId>> {
        let url = url.trim();
        if url.is_empty() {
            debug!("event=bookmark_add module=repo status=skip reason=empty_url");
            return Ok(None);
        }

        let bookmark = Bookmark::new(url, desc.map(str::to_string));
        let id = bookmark.id;
        self.bookmarks.push(bookmark)?;
        info!("event=bookmark_add module=repo status=ok bookmark_id={id}");
        Ok(Some(id))
    }

    /// Replaces URL and description, both trimmed.
    pub fn edit(&mut self, id: BookmarkId, url: &str, desc: Option<&str>) -> RepoResult<()> {
        let url = url.trim().to_string();
        let desc = non_empty(desc.map(str::to_string));
        self.bookmarks.update(id, |bookmark| {
            bookmark.url = url;
            bookmark.desc = desc;
        })
    }

    pub fn remove(&mut self, id: BookmarkId) -> RepoResult<Bookmark> {
        self.bookmarks.remove(id)
    }

    pub fn reorder(&mut self, ids: &[BookmarkId]) -> RepoResult<()> {
        self.bookmarks.reorder(ids)
    }
}
