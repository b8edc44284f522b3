//! SQLite-backed storage with a pooled connection manager.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;

use super::migrations;
use crate::config::defaults;
use crate::error::NoteResult;

pub(crate) type DbPool = Pool<SqliteConnectionManager>;
pub(crate) type DbConn = PooledConnection<SqliteConnectionManager>;

/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (or create) the database file and bring its schema up to date
    pub fn new(database_url: &str) -> NoteResult<Self> {
        Self::with_pool_size(database_url, defaults::DB_POOL_SIZE)
    }

    pub fn with_pool_size(database_url: &str, pool_size: u32) -> NoteResult<Self> {
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    log::warn!("[DB] Could not create {:?}: {}", parent, e);
                }
            }
        }

        let manager = SqliteConnectionManager::file(database_url)
            .with_init(|conn| conn.busy_timeout(BUSY_TIMEOUT));
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        let db = Self { pool };
        let mut conn = db.conn()?;
        let applied = migrations::run(&mut conn)?;
        if applied > 0 {
            log::info!("[DB] Applied {} migration(s) to {}", applied, database_url);
        }

        Ok(db)
    }

    /// Check out a pooled connection
    pub(crate) fn conn(&self) -> NoteResult<DbConn> {
        Ok(self.pool.get()?)
    }
}
