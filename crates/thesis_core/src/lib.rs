//! Core domain logic for thesis information records.
//! This crate is the single source of truth for record admission rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::degree::{Degree, DEGREE_SCHEMA};
pub use model::record::{fold_key, Record, RecordId, RecordSchema, UNSAVED_ID};
pub use model::role::{Role, ROLE_SCHEMA};
pub use repo::memory_repo::InMemoryRecordRepository;
pub use repo::record_repo::{
    count_records, RecordRepository, RepoError, RepoResult, SqliteRecordRepository,
};
pub use service::record_service::{DegreeService, RecordService, RoleService};
pub use validation::{validate, RejectReason, Verdict};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
