//! Data-access seam between the controller and a concrete store.

use crate::error::NoteResult;
use crate::models::{Note, NoteInput, Page};

/// Persistence operations the note controller depends on.
///
/// Implementations own the canonical records; callers only ever hold
/// request-scoped copies.
pub trait NoteRepository: Send + Sync {
    /// Look up a note by id
    fn find_note(&self, id: i64) -> NoteResult<Option<Note>>;

    /// One page of notes, newest first (`created_at DESC, id DESC`)
    fn paginate_notes(&self, page: u32, per_page: u32) -> NoteResult<Page<Note>>;

    /// Insert a note; the store assigns the id and both timestamps
    fn create_note(&self, input: &NoteInput) -> NoteResult<Note>;

    /// Replace a note's attributes. `updated_at` only moves when an
    /// attribute actually changed. Returns `None` for an unknown id.
    fn update_note(&self, id: i64, input: &NoteInput) -> NoteResult<Option<Note>>;

    /// Permanently remove a note. Returns `false` for an unknown id.
    fn delete_note(&self, id: i64) -> NoteResult<bool>;

    fn count_notes(&self) -> NoteResult<i64>;
}
