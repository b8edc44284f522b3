//! Schema migrations, tracked through `PRAGMA user_version`.
//!
//! Steps are append-only: a database at version N has had the first N
//! entries of `MIGRATIONS` applied.

use rusqlite::{Connection, Result as SqliteResult};

pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[Migration {
    name: "create_notes_table",
    sql: "CREATE TABLE notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            body TEXT NOT NULL,
            user_id INTEGER,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
          );
          CREATE INDEX idx_notes_created_at ON notes (created_at DESC, id DESC);
          CREATE INDEX idx_notes_user_id ON notes (user_id);",
}];

/// Current schema version of a connection
pub(crate) fn schema_version(conn: &Connection) -> SqliteResult<usize> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version.max(0) as usize)
}

/// Apply all pending migrations in one transaction. Returns how many ran.
pub fn run(conn: &mut Connection) -> SqliteResult<usize> {
    let current = schema_version(conn)?;
    if current >= MIGRATIONS.len() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for (index, migration) in MIGRATIONS.iter().enumerate().skip(current) {
        log::info!("[DB] Running migration {} ({})", index + 1, migration.name);
        tx.execute_batch(migration.sql)?;
    }
    tx.pragma_update(None, "user_version", MIGRATIONS.len() as i64)?;
    tx.commit()?;

    Ok(MIGRATIONS.len() - current)
}
