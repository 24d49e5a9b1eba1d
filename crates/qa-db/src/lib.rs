pub mod error;
pub mod repos;
mod rows;
pub mod schema;
pub mod seed;

pub use error::{DbError, Result};

use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};

/// Store file opened when nothing else is configured.
pub const DEFAULT_DB_FILE: &str = "questions.db";

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
    /// Let SQLite enforce the `REFERENCES` clauses of the schema.
    pub foreign_keys: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_FILE),
            foreign_keys: true,
        }
    }
}

/// Handle to the forum store. Open one per process and pass it by reference
/// to every repository call; the connection is serialized behind a mutex.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(config: &DbConfig) -> Result<Self> {
        let conn = Connection::open(&config.path)?;

        let journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(%journal_mode, "journal mode set");

        let db = Self::init(conn, config.foreign_keys)?;
        info!(
            foreign_keys = config.foreign_keys,
            "Database opened at {}",
            config.path.display()
        );
        Ok(db)
    }

    /// In-memory store with foreign keys enforced.
    pub fn open_in_memory() -> Result<Self> {
        Self::open_in_memory_with(true)
    }

    pub fn open_in_memory_with(foreign_keys: bool) -> Result<Self> {
        Self::init(Connection::open_in_memory()?, foreign_keys)
    }

    fn init(conn: Connection, foreign_keys: bool) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", foreign_keys)?;
        schema::ensure(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DbError::LockPoisoned(e.to_string()))?;
        f(&conn)
    }
}
