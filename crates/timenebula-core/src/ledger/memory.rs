//! In-process ledger.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{HourChunk, Ledger, NewHourChunk, Session};
use crate::error::PersistenceError;

#[derive(Debug, Default)]
struct Tables {
    sessions: Vec<Session>,
    chunks: Vec<HourChunk>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Ledger kept in memory.
///
/// With [`MemoryLedger::set_unavailable`] every write fails with
/// [`PersistenceError::Unavailable`]; reads keep working.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger whose writes all fail.
    pub fn unavailable() -> Self {
        let ledger = Self::default();
        ledger.set_unavailable(true);
        ledger
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, PersistenceError> {
        self.tables
            .lock()
            .map_err(|_| PersistenceError::Unavailable("memory ledger poisoned".into()))
    }

    fn writable(&self) -> Result<MutexGuard<'_, Tables>, PersistenceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("writes disabled".into()));
        }
        self.lock()
    }
}

impl Ledger for MemoryLedger {
    fn create_session(&self, start_time: u64) -> Result<i64, PersistenceError> {
        let mut tables = self.writable()?;
        let id = tables.next_id();
        tables.sessions.push(Session {
            id,
            start_time,
            end_time: None,
        });
        Ok(id)
    }

    fn close_session(&self, id: i64, end_time: u64) -> Result<(), PersistenceError> {
        let mut tables = self.writable()?;
        let session = tables
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(PersistenceError::NotFound { table: "sessions", id })?;
        session.end_time = Some(end_time);
        Ok(())
    }

    fn add_hour_chunk(&self, chunk: &NewHourChunk) -> Result<i64, PersistenceError> {
        let mut tables = self.writable()?;
        let id = tables.next_id();
        tables.chunks.push(chunk.clone().with_id(id));
        Ok(id)
    }

    fn list_hour_chunks(&self) -> Result<Vec<HourChunk>, PersistenceError> {
        let mut chunks = self.lock()?.chunks.clone();
        chunks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(chunks)
    }

    fn get_session(&self, id: i64) -> Result<Option<Session>, PersistenceError> {
        Ok(self.lock()?.sessions.iter().find(|s| s.id == id).cloned())
    }

    fn list_sessions(&self) -> Result<Vec<Session>, PersistenceError> {
        let mut sessions = self.lock()?.sessions.clone();
        sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
        Ok(sessions)
    }
}
