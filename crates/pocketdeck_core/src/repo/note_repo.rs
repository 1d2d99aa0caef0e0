//! Note repository. Note bodies are free text and only trimmed on add.

use super::collection::{Collection, Record, RepoResult};
use crate::config::NOTES_KEY;
use crate::model::note::{Note, NoteId};
use crate::model::EntityId;
use crate::store::KeyValueStore;
use log::{debug, info};

impl Record for Note {
    const STORE_KEY: &'static str = NOTES_KEY;

    fn id(&self) -> EntityId {
        self.id
    }
}

pub struct NoteRepository<S> {
    notes: Collection<Note, S>,
}

impl<S: KeyValueStore> NoteRepository<S> {
    pub fn load(store: S) -> RepoResult<Self> {
        Ok(Self {
            notes: Collection::load(store)?,
        })
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.items()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    /// Appends a note. Blank text is ignored.
    pub fn add_note(&mut self, text: &str) -> RepoResult<Option<NoteId>> {
        let text = text.trim();
        if text.is_empty() {
            debug!("event=note_add module=repo status=skip reason=empty_text");
            return Ok(None);
        }

        let note = Note::new(text);
        let id = note.id;
        self.notes.push(note)?;
        info!("event=note_add module=repo status=ok note_id={id}");
        Ok(Some(id))
    }

    /// Replaces the body verbatim (edits keep leading/trailing whitespace).
    pub fn edit_text(&mut self, id: NoteId, text: &str) -> RepoResult<()> {
        let text = text.to_string();
        self.notes.update(id, |note| note.text = text)
    }

    pub fn remove(&mut self, id: NoteId) -> RepoResult<Note> {
        self.notes.remove(id)
    }

    pub fn reorder(&mut self, ids: &[NoteId]) -> RepoResult<()> {
        self.notes.reorder(ids)
    }
}
