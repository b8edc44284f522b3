//! Database seeder. Fills the configured database with factory notes.
//!
//! `SEED_NOTES` controls how many are inserted (default 25).

use dotenv::dotenv;
use std::process::ExitCode;

use notes_backend::config::{self, Config};
use notes_backend::db::{Database, NoteFactory, NoteRepository};

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("[SEED] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    if config.uses_memory_store() {
        return Err("DATABASE_URL=:memory: cannot be seeded; point it at a database file".into());
    }

    let count = config::seed_count()?;
    let db = Database::with_pool_size(&config.database_url, config.db_pool_size)?;

    log::info!("[SEED] Inserting {} notes into {}", count, config.database_url);
    let created = NoteFactory::new().with_owners(1..=5).create_many(&db, count)?;
    log::info!(
        "[SEED] Inserted {} notes ({} total)",
        created.len(),
        db.count_notes()?
    );

    Ok(())
}
