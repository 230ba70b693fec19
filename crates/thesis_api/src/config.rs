//! Environment-driven adapter configuration.
//!
//! # Responsibility
//! - Resolve database path and logging settings from the process
//!   environment.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - Resolution never fails; every setting has a default.

use std::path::PathBuf;
use std::sync::OnceLock;
use thesis_core::default_log_level;

pub const DB_PATH_ENV: &str = "THESIS_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "THESIS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "THESIS_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "thesis_info.sqlite3";

static ENV_CONFIG: OnceLock<ApiConfig> = OnceLock::new();

/// Resolved adapter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Log directory; file logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl ApiConfig {
    /// Returns the process-wide configuration, read from the environment
    /// on first use.
    pub fn from_env() -> &'static Self {
        ENV_CONFIG.get_or_init(|| Self::from_lookup(|name| std::env::var(name).ok()))
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_variables_are_missing_or_blank() {
        let config = ApiConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "   ")]));

        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("thesis_info.sqlite3")
        );
        assert_eq!(config.log_level, thesis_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_variables_are_trimmed_and_used() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /srv/thesis/records.db "),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/thesis"),
        ]));

        assert_eq!(config.db_path, PathBuf::from("/srv/thesis/records.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/thesis")));
    }
}
