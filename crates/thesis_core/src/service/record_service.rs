//! Record use-case service.
//!
//! # Responsibility
//! - Provide list/validate/create/get/update/delete entry points for one
//!   record kind.
//! - Keep the two-phase contract: callers validate first, then mutate.
//!
//! # Invariants
//! - `create`/`update` assume a prior `Verdict::Accepted` for the same
//!   candidate; they do not re-run validation.
//! - `update`/`delete` on a missing id return `Ok(None)` and change nothing.
//! - `update` keeps the stored id, never the candidate's.

use crate::model::degree::Degree;
use crate::model::record::{Record, RecordId};
use crate::model::role::Role;
use crate::repo::record_repo::{RecordRepository, RepoError, RepoResult};
use crate::validation::{validate, Verdict};
use log::{debug, info, warn};
use std::marker::PhantomData;

/// Use-case service wrapper for one record kind.
pub struct RecordService<R: Record, S: RecordRepository<R>> {
    repo: S,
    _record: PhantomData<fn() -> R>,
}

pub type DegreeService<S> = RecordService<Degree, S>;
pub type RoleService<S> = RecordService<Role, S>;

impl<R: Record, S: RecordRepository<R>> RecordService<R, S> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: S) -> Self {
        Self {
            repo,
            _record: PhantomData,
        }
    }

    /// Lists every record in insertion order.
    pub fn list(&self) -> RepoResult<Vec<R>> {
        self.repo.list_all()
    }

    /// Runs admission checks for `candidate` as the next state of `id`.
    pub fn validate(&self, id: RecordId, candidate: &R) -> RepoResult<Verdict> {
        let verdict = validate(id, candidate, &self.repo)?;
        if let Verdict::Rejected(reason) = &verdict {
            debug!(
                "event=record_validate module=service kind={} status=rejected id={} reason={}",
                R::SCHEMA.kind,
                id,
                reason
            );
        }
        Ok(verdict)
    }

    /// Persists an accepted candidate under a fresh id.
    pub fn create(&self, candidate: &R) -> RepoResult<R> {
        let created = self.repo.insert(candidate)?;
        info!(
            "event=record_create module=service kind={} status=ok id={}",
            R::SCHEMA.kind,
            created.id()
        );
        Ok(created)
    }

    pub fn get(&self, id: RecordId) -> RepoResult<Option<R>> {
        self.repo.find_by_id(id)
    }

    /// Overwrites the record at `id` with the candidate's fields.
    ///
    /// Returns `Ok(None)` when no record has that id.
    pub fn update(&self, id: RecordId, candidate: &R) -> RepoResult<Option<R>> {
        let Some(mut existing) = self.repo.find_by_id(id)? else {
            return Ok(None);
        };

        existing.apply_changes(candidate);
        match self.repo.save(&existing) {
            Ok(updated) => {
                info!(
                    "event=record_update module=service kind={} status=ok id={}",
                    R::SCHEMA.kind,
                    id
                );
                Ok(Some(updated))
            }
            Err(RepoError::NotFound(_)) => {
                warn!(
                    "event=record_update module=service kind={} status=not_found id={} detail=removed_concurrently",
                    R::SCHEMA.kind,
                    id
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Removes the record at `id` and returns what was removed.
    ///
    /// Returns `Ok(None)` when no record has that id.
    pub fn delete(&self, id: RecordId) -> RepoResult<Option<R>> {
        let Some(existing) = self.repo.find_by_id(id)? else {
            return Ok(None);
        };

        match self.repo.delete_by_id(id) {
            Ok(()) => {
                info!(
                    "event=record_delete module=service kind={} status=ok id={}",
                    R::SCHEMA.kind,
                    id
                );
                Ok(Some(existing))
            }
            Err(RepoError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
