//! Mutex-guarded in-memory record repository.
//!
//! # Responsibility
//! - Offer the same contract as the SQLite store without a database, for
//!   tests and embedding callers that do not need durability.
//!
//! # Invariants
//! - Ids start at 1 and are never reused, matching SQLite `AUTOINCREMENT`.
//! - Uniqueness of folded natural keys is checked inside the lock, so a
//!   check-then-write on one store is serialized.

use crate::model::record::{fold_key, Record, RecordId};
use crate::repo::record_repo::{RecordRepository, RepoError, RepoResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct InMemoryRecordRepository<R: Record> {
    state: Mutex<MemoryState<R>>,
}

struct MemoryState<R> {
    last_id: RecordId,
    rows: BTreeMap<RecordId, R>,
}

impl<R: Record> MemoryState<R> {
    fn key_taken_by_other(&self, folded: &str, id: RecordId) -> bool {
        self.rows.values().any(|row| {
            row.id() != id && row.natural_key().map(fold_key).as_deref() == Some(folded)
        })
    }
}

impl<R: Record> Default for InMemoryRecordRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> InMemoryRecordRepository<R> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                last_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState<R>> {
        // Every mutation completes before the guard drops, so a poisoned
        // state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Record> RecordRepository<R> for InMemoryRecordRepository<R> {
    fn list_all(&self) -> RepoResult<Vec<R>> {
        Ok(self.lock().rows.values().cloned().collect())
    }

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<R>> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    fn find_by_natural_key(&self, key: &str) -> RepoResult<Option<R>> {
        let folded = fold_key(key);
        Ok(self
            .lock()
            .rows
            .values()
            .find(|row| row.natural_key().map(fold_key).as_deref() == Some(folded.as_str()))
            .cloned())
    }

    fn insert(&self, record: &R) -> RepoResult<R> {
        let key = record
            .natural_key()
            .ok_or(RepoError::MissingKey(R::SCHEMA.kind))?;
        let mut state = self.lock();
        if state.key_taken_by_other(&fold_key(key), 0) {
            return Err(RepoError::Conflict(key.to_owned()));
        }

        state.last_id += 1;
        let stored = record.with_id(state.last_id);
        state.rows.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    fn save(&self, record: &R) -> RepoResult<R> {
        let key = record
            .natural_key()
            .ok_or(RepoError::MissingKey(R::SCHEMA.kind))?;
        let mut state = self.lock();
        if !state.rows.contains_key(&record.id()) {
            return Err(RepoError::NotFound(record.id()));
        }
        if state.key_taken_by_other(&fold_key(key), record.id()) {
            return Err(RepoError::Conflict(key.to_owned()));
        }

        state.rows.insert(record.id(), record.clone());
        Ok(record.clone())
    }

    fn delete_by_id(&self, id: RecordId) -> RepoResult<()> {
        match self.lock().rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound(id)),
        }
    }
}
