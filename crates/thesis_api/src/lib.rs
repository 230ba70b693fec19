//! Adapter crate exposing the degree/role collections to transports.
//!
//! # Responsibility
//! - Own connection setup from environment configuration.
//! - Re-export the response-mapping handlers in [`api`].

pub mod api;
pub mod config;

pub use api::{
    create_record, create_record_json, delete_record, get_record, list_records,
    not_found_message, update_record, update_record_json, ApiResponse, ErrorMessage,
    ResponseBody,
};
pub use config::ApiConfig;

use log::{error, info};
use rusqlite::Connection;
use serde::Serialize;
use thesis_core::db::open_db;
use thesis_core::{
    count_records, init_logging, Degree, DegreeService, RepoResult, Role, RoleService,
    SqliteRecordRepository,
};

/// Both record services bound to one SQLite connection.
pub struct Collections<'conn> {
    pub degrees: DegreeService<SqliteRecordRepository<'conn, Degree>>,
    pub roles: RoleService<SqliteRecordRepository<'conn, Role>>,
    conn: &'conn Connection,
}

/// Stored record totals per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionCounts {
    pub degrees: u64,
    pub roles: u64,
}

impl<'conn> Collections<'conn> {
    /// Binds services to an already migrated connection.
    pub fn open(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self {
            degrees: DegreeService::new(SqliteRecordRepository::try_new(conn)?),
            roles: RoleService::new(SqliteRecordRepository::try_new(conn)?),
            conn,
        })
    }

    /// Counts both collections without loading their records.
    pub fn counts(&self) -> RepoResult<CollectionCounts> {
        Ok(CollectionCounts {
            degrees: count_records::<Degree>(self.conn)?,
            roles: count_records::<Role>(self.conn)?,
        })
    }
}

/// Starts file logging when the configuration names a log directory.
///
/// Returns a human-readable error instead of failing the caller; logging is
/// optional for every adapter entry point.
pub fn init_logging_from(config: &ApiConfig) -> Option<String> {
    let log_dir = config.log_dir.as_ref()?;
    let log_dir = log_dir.to_string_lossy();
    match init_logging(&config.log_level, &log_dir) {
        Ok(()) => None,
        Err(err) => Some(err.to_string()),
    }
}

/// Opens the configured database and runs `f` against both collections.
///
/// # Errors
/// Returns a human-readable message when the database cannot be opened.
pub fn with_collections<T>(
    config: &ApiConfig,
    f: impl FnOnce(&Collections<'_>) -> T,
) -> Result<T, String> {
    let conn = open_db(&config.db_path).map_err(|err| {
        error!(
            "event=collections_open module=api status=error db_path={} error={}",
            config.db_path.display(),
            err
        );
        format!("database open failed: {err}")
    })?;
    let collections =
        Collections::open(&conn).map_err(|err| format!("collections init failed: {err}"))?;
    info!("event=collections_open module=api status=ok");
    Ok(f(&collections))
}
