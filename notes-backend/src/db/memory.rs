//! In-process note store, selected with `DATABASE_URL=:memory:`.

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::NoteRepository;
use crate::error::NoteResult;
use crate::models::{Note, NoteInput, Page};

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    notes: BTreeMap<i64, Note>,
}

#[derive(Default)]
pub struct MemoryNoteRepository {
    state: RwLock<MemoryState>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteRepository for MemoryNoteRepository {
    fn find_note(&self, id: i64) -> NoteResult<Option<Note>> {
        Ok(self.state.read().notes.get(&id).cloned())
    }

    fn paginate_notes(&self, page: u32, per_page: u32) -> NoteResult<Page<Note>> {
        let page = Page::<Note>::normalize(page);
        let state = self.state.read();

        let mut ordered: Vec<&Note> = state.notes.values().collect();
        ordered.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let items = ordered
            .into_iter()
            .skip(Page::<Note>::offset(page, per_page) as usize)
            .take(per_page as usize)
            .cloned()
            .collect();

        Ok(Page {
            items,
            page,
            per_page,
            total: state.notes.len() as i64,
        })
    }

    fn create_note(&self, input: &NoteInput) -> NoteResult<Note> {
        let mut state = self.state.write();
        state.last_id += 1;

        let now = Utc::now();
        let note = Note {
            id: state.last_id,
            title: input.title.clone(),
            body: input.body.clone(),
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        };
        state.notes.insert(note.id, note.clone());

        Ok(note)
    }

    fn update_note(&self, id: i64, input: &NoteInput) -> NoteResult<Option<Note>> {
        let mut state = self.state.write();
        let Some(note) = state.notes.get_mut(&id) else {
            return Ok(None);
        };

        let changed =
            note.title != input.title || note.body != input.body || note.user_id != input.user_id;
        if changed {
            note.title = input.title.clone();
            note.body = input.body.clone();
            note.user_id = input.user_id;
            note.updated_at = Utc::now();
        }

        Ok(Some(note.clone()))
    }

    fn delete_note(&self, id: i64) -> NoteResult<bool> {
        Ok(self.state.write().notes.remove(&id).is_some())
    }

    fn count_notes(&self) -> NoteResult<i64> {
        Ok(self.state.read().notes.len() as i64)
    }
}
