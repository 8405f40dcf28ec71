//! Durable record of work sessions and claimed hour chunks.
//!
//! The engine talks to storage only through [`Ledger`]. [`crate::Database`]
//! is the SQLite implementation; [`MemoryLedger`] keeps everything in
//! process and can be told to fail every write.

mod memory;
mod report;

pub use memory::MemoryLedger;
pub use report::{ProjectTotal, VaultSummary, UNKNOWN_PROJECT};

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// One continuous work period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub start_time: u64,
    #[serde(default)]
    pub end_time: Option<u64>,
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStatus {
    /// Admitted by the schema; never written by the engine.
    Pending,
    Collected,
}

impl ChunkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ChunkStatus::Pending => "pending",
            ChunkStatus::Collected => "collected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ChunkStatus::Pending),
            "collected" => Some(ChunkStatus::Collected),
            _ => None,
        }
    }
}

/// One claimed reward unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourChunk {
    pub id: i64,
    pub session_id: i64,
    /// When the claim was made, not when the unit became due.
    pub timestamp: u64,
    pub amount: u64,
    pub status: ChunkStatus,
    #[serde(default)]
    pub project: Option<String>,
}

/// Insert payload for [`Ledger::add_hour_chunk`]; the id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHourChunk {
    pub session_id: i64,
    pub timestamp: u64,
    pub amount: u64,
    pub status: ChunkStatus,
    pub project: Option<String>,
}

impl NewHourChunk {
    /// A chunk claimed for `project` at `timestamp`.
    pub fn collected(session_id: i64, timestamp: u64, amount: u64, project: &str) -> Self {
        Self {
            session_id,
            timestamp,
            amount,
            status: ChunkStatus::Collected,
            project: Some(project.to_string()),
        }
    }

    pub fn with_id(self, id: i64) -> HourChunk {
        HourChunk {
            id,
            session_id: self.session_id,
            timestamp: self.timestamp,
            amount: self.amount,
            status: self.status,
            project: self.project,
        }
    }
}

/// Storage contract for sessions and hour chunks.
///
/// Chunks are append-only: there is no update or delete.
pub trait Ledger {
    /// Insert an open session and return its id.
    fn create_session(&self, start_time: u64) -> Result<i64, PersistenceError>;

    /// Set `end_time` on an existing session.
    ///
    /// Returns [`PersistenceError::NotFound`] if no session has this id.
    fn close_session(&self, id: i64, end_time: u64) -> Result<(), PersistenceError>;

    /// Append a chunk and return its id.
    fn add_hour_chunk(&self, chunk: &NewHourChunk) -> Result<i64, PersistenceError>;

    /// All chunks, newest claim first.
    fn list_hour_chunks(&self) -> Result<Vec<HourChunk>, PersistenceError>;

    fn get_session(&self, id: i64) -> Result<Option<Session>, PersistenceError>;

    /// All sessions, most recently started first.
    fn list_sessions(&self) -> Result<Vec<Session>, PersistenceError>;

    /// Aggregate the chunk history for the vault view.
    fn vault_summary(&self) -> Result<VaultSummary, PersistenceError> {
        Ok(VaultSummary::from_chunks(&self.list_hour_chunks()?))
    }
}

impl<L: Ledger + ?Sized> Ledger for &L {
    fn create_session(&self, start_time: u64) -> Result<i64, PersistenceError> {
        (**self).create_session(start_time)
    }

    fn close_session(&self, id: i64, end_time: u64) -> Result<(), PersistenceError> {
        (**self).close_session(id, end_time)
    }

    fn add_hour_chunk(&self, chunk: &NewHourChunk) -> Result<i64, PersistenceError> {
        (**self).add_hour_chunk(chunk)
    }

    fn list_hour_chunks(&self) -> Result<Vec<HourChunk>, PersistenceError> {
        (**self).list_hour_chunks()
    }

    fn get_session(&self, id: i64) -> Result<Option<Session>, PersistenceError> {
        (**self).get_session(id)
    }

    fn list_sessions(&self) -> Result<Vec<Session>, PersistenceError> {
        (**self).list_sessions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_status_roundtrips_through_str() {
        for status in [ChunkStatus::Pending, ChunkStatus::Collected] {
            assert_eq!(ChunkStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ChunkStatus::parse("lost"), None);
    }

    #[test]
    fn collected_chunk_carries_project() {
        let chunk = NewHourChunk::collected(3, 10, 350, "Code").with_id(9);
        assert_eq!(chunk.id, 9);
        assert_eq!(chunk.status, ChunkStatus::Collected);
        assert_eq!(chunk.project.as_deref(), Some("Code"));
    }

    #[test]
    fn chunk_status_serializes_lowercase() {
        let json = serde_json::to_string(&ChunkStatus::Collected).unwrap();
        assert_eq!(json, "\"collected\"");
    }
}
