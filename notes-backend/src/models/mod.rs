mod note;
mod page;

pub use note::{Note, NoteForm, NoteInput, TITLE_MAX_CHARS};
pub use page::{NOTES_PER_PAGE, Page};
