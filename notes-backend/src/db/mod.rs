pub mod factory;
pub mod memory;
pub mod migrations;
pub mod repository;
pub mod sqlite;
mod tables;

pub use factory::NoteFactory;
pub use memory::MemoryNoteRepository;
pub use repository::NoteRepository;
pub use sqlite::Database;
