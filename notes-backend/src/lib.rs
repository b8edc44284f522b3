//! Server-rendered notes application: a CRUD resource for `Note` backed by
//! SQLite, shared by the HTTP server and the seeder binary.

pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod views;

use std::sync::Arc;
use std::time::Instant;

use config::Config;
use db::{Database, MemoryNoteRepository, NoteRepository};
use error::NoteResult;

pub struct AppState {
    /// Injected note store; SQLite in production, in-memory for `:memory:` and tests
    pub notes: Arc<dyn NoteRepository>,
    pub config: Config,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteRepository>, config: Config) -> Self {
        Self {
            notes,
            config,
            started_at: Instant::now(),
        }
    }
}

/// Build the repository named by `DATABASE_URL`
pub fn open_repository(config: &Config) -> NoteResult<Arc<dyn NoteRepository>> {
    if config.uses_memory_store() {
        log::warn!("[DB] Using the in-memory note store; notes are lost on restart");
        return Ok(Arc::new(MemoryNoteRepository::new()));
    }

    log::info!("[DB] Opening database at {}", config.database_url);
    let db = Database::with_pool_size(&config.database_url, config.db_pool_size)?;
    Ok(Arc::new(db))
}
