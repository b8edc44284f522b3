use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    /// Path to the SQLite file, or `:memory:` for the in-process store.
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const DB_POOL_SIZE: &str = "DB_POOL_SIZE";
    pub const STATIC_DIR: &str = "STATIC_DIR";
    /// Number of notes inserted by the `seed_notes` binary.
    pub const SEED_NOTES: &str = "SEED_NOTES";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8080;
    pub const DATABASE_URL: &str = "./.db/notes.db";
    pub const DB_POOL_SIZE: u32 = 8;
    pub const STATIC_DIR: &str = "public";
    pub const SEED_NOTES: usize = 25;
}

/// Sentinel `DATABASE_URL` selecting the in-memory repository.
pub const MEMORY_DATABASE_URL: &str = ":memory:";

/// Returns the absolute path to the notes-backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it always resolves
/// to notes-backend/ regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Get the bundled static assets directory
pub fn default_static_dir() -> String {
    backend_dir().join(defaults::STATIC_DIR).to_string_lossy().to_string()
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_pool_size: u32,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var(env_vars::HOST).unwrap_or_else(|_| defaults::HOST.to_string()),
            port: parse_var(env_vars::PORT, defaults::PORT)?,
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            db_pool_size: parse_var(env_vars::DB_POOL_SIZE, defaults::DB_POOL_SIZE)?,
            static_dir: env::var(env_vars::STATIC_DIR).unwrap_or_else(|_| default_static_dir()),
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            database_url: defaults::DATABASE_URL.to_string(),
            db_pool_size: defaults::DB_POOL_SIZE,
            static_dir: default_static_dir(),
        }
    }
}

/// How many notes the seeder should insert
pub fn seed_count() -> Result<usize, ConfigError> {
    parse_var(env_vars::SEED_NOTES, defaults::SEED_NOTES)
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}
