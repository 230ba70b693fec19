//! Candidate admission rules.
//!
//! # Responsibility
//! - Decide whether a create/update candidate may be persisted.
//! - Report one deterministic rejection reason per candidate.
//!
//! # Invariants
//! - Rejections are values ([`Verdict::Rejected`]), never errors.
//! - Only storage failures surface as `Err`.

pub mod validator;
pub mod verdict;

pub use validator::validate;
pub use verdict::{RejectReason, Verdict};
