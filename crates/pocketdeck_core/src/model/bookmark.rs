//! Bookmark record. The URL is stored verbatim; nothing is fetched for it.

use super::{non_empty, EntityId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BookmarkId = EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub url: String,
    #[serde(default)]
    pub desc: Option<String>,
}

impl Bookmark {
    pub fn new(url: impl Into<String>, desc: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            desc: non_empty(desc),
        }
    }

    /// Description with blank values treated as absent.
    pub fn description(&self) -> Option<&str> {
        self.desc.as_deref().filter(|desc| !desc.trim().is_empty())
    }
}
