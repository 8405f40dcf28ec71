//! SQLite-backed ledger.
//!
//! Provides persistent storage for:
//! - Work sessions
//! - Claimed hour chunks
//! - Key-value store for application state

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{data_dir, migrations};
use crate::error::PersistenceError;
use crate::ledger::{ChunkStatus, HourChunk, Ledger, NewHourChunk, Session};

/// SQLite database holding the ledger.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/timenebula.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, PersistenceError> {
        let dir = data_dir().map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        Self::open_at(&dir.join("timenebula.db"))
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path).map_err(|source| PersistenceError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, PersistenceError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, PersistenceError> {
        migrations::migrate(&conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        start_time: row.get(1)?,
        end_time: row.get(2)?,
    })
}

fn chunk_from_row(row: &Row<'_>) -> rusqlite::Result<HourChunk> {
    let status: String = row.get(4)?;
    let status = ChunkStatus::parse(&status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown chunk status '{status}'").into(),
        )
    })?;
    Ok(HourChunk {
        id: row.get(0)?,
        session_id: row.get(1)?,
        timestamp: row.get(2)?,
        amount: row.get(3)?,
        status,
        project: row.get(5)?,
    })
}

impl Ledger for Database {
    fn create_session(&self, start_time: u64) -> Result<i64, PersistenceError> {
        self.conn.execute(
            "INSERT INTO sessions (start_time) VALUES (?1)",
            params![start_time],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn close_session(&self, id: i64, end_time: u64) -> Result<(), PersistenceError> {
        let updated = self.conn.execute(
            "UPDATE sessions SET end_time = ?1 WHERE id = ?2",
            params![end_time, id],
        )?;
        if updated == 0 {
            return Err(PersistenceError::NotFound { table: "sessions", id });
        }
        Ok(())
    }

    fn add_hour_chunk(&self, chunk: &NewHourChunk) -> Result<i64, PersistenceError> {
        self.conn.execute(
            "INSERT INTO hour_chunks (session_id, timestamp, amount, status, project)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                chunk.session_id,
                chunk.timestamp,
                chunk.amount,
                chunk.status.as_str(),
                chunk.project,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_hour_chunks(&self) -> Result<Vec<HourChunk>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, timestamp, amount, status, project
             FROM hour_chunks
             ORDER BY timestamp DESC, id DESC",
        )?;
        let chunks = stmt
            .query_map([], chunk_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(chunks)
    }

    fn get_session(&self, id: i64) -> Result<Option<Session>, PersistenceError> {
        let session = self
            .conn
            .query_row(
                "SELECT id, start_time, end_time FROM sessions WHERE id = ?1",
                params![id],
                session_from_row,
            )
            .optional()?;
        Ok(session)
    }

    fn list_sessions(&self) -> Result<Vec<Session>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, start_time, end_time
             FROM sessions
             ORDER BY start_time DESC, id DESC",
        )?;
        let sessions = stmt
            .query_map([], session_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sessions)
    }
}
