//! Generic record validator.
//!
//! Checks run in a fixed order: key presence, label presence, then key
//! uniqueness. The store lookup only happens once both presence checks pass.

use crate::model::record::{is_blank, Record, RecordId};
use crate::repo::record_repo::{RecordRepository, RepoResult};
use crate::validation::verdict::{RejectReason, Verdict};

/// Validates `candidate` as the next state of the record at `candidate_id`.
///
/// Pass the target id for updates so a record may keep its own key; pass
/// the candidate's own id (normally `UNSAVED_ID`) for creates.
///
/// # Errors
/// Returns repository errors from the uniqueness lookup unchanged.
pub fn validate<R, S>(candidate_id: RecordId, candidate: &R, repo: &S) -> RepoResult<Verdict>
where
    R: Record,
    S: RecordRepository<R> + ?Sized,
{
    let key = match candidate.natural_key() {
        Some(key) if !key.is_empty() => key,
        _ => return Ok(Verdict::Rejected(RejectReason::KeyRequired)),
    };

    if R::SCHEMA.label_required && is_blank(candidate.label()) {
        return Ok(Verdict::Rejected(RejectReason::LabelRequired));
    }

    match repo.find_by_natural_key(key)? {
        Some(existing) if existing.id() != candidate_id => Ok(Verdict::Rejected(
            RejectReason::KeyConflict(key.to_owned()),
        )),
        _ => Ok(Verdict::Accepted),
    }
}
