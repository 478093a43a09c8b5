//! Runtime configuration resolution.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level from explicit
//!   overrides, then environment variables, then defaults.
//!
//! # Invariants
//! - Explicit overrides always win over environment values.
//! - Blank values are treated as absent.

use crate::db::migrations::latest_version;
use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "QUICKNOTE_DB_PATH";
pub const LOG_DIR_ENV: &str = "QUICKNOTE_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "QUICKNOTE_LOG_LEVEL";
pub const DEFAULT_DB_FILE_NAME: &str = "quicknote.sqlite3";
/// Level used for stderr logging when none is configured.
pub const STDERR_DEFAULT_LOG_LEVEL: &str = "warn";

/// Schema version this binary opens the notes store at.
pub fn schema_version() -> u32 {
    latest_version()
}

/// Where and at which version the notes store is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub schema_version: u32,
}

impl StoreConfig {
    /// Store config at the current schema version.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            schema_version: schema_version(),
        }
    }
}

/// Fully resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    /// Rolling file logs when set; stderr logging otherwise.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

/// Explicit values supplied by the caller (CLI flags).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Resolves configuration from overrides and the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves configuration using `lookup` in place of the environment.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = overrides
            .db_path
            .or_else(|| non_blank(DB_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_dir = overrides
            .log_dir
            .or_else(|| non_blank(LOG_DIR_ENV).map(PathBuf::from));
        let log_level = overrides
            .log_level
            .or_else(|| non_blank(LOG_LEVEL_ENV))
            .unwrap_or_else(|| {
                if log_dir.is_some() {
                    default_log_level().to_string()
                } else {
                    STDERR_DEFAULT_LOG_LEVEL.to_string()
                }
            });

        Self {
            store: StoreConfig::new(db_path),
            log_dir,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppConfig, ConfigOverrides, DB_PATH_ENV, DEFAULT_DB_FILE_NAME, LOG_DIR_ENV,
        LOG_LEVEL_ENV, STDERR_DEFAULT_LOG_LEVEL,
    };
    use crate::logging::default_log_level;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let config = AppConfig::resolve_with(ConfigOverrides::default(), |_| None);
        assert_eq!(
            config.store.db_path,
            std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
        );
        assert!(config.log_dir.is_none());
        assert_eq!(config.log_level, STDERR_DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn file_logging_defaults_to_build_mode_level() {
        let config = AppConfig::resolve_with(ConfigOverrides::default(), |key| match key {
            LOG_DIR_ENV => Some("/var/log/quicknote".to_string()),
            _ => None,
        });
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/quicknote")));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn environment_is_used_and_blank_values_ignored() {
        let config = AppConfig::resolve_with(ConfigOverrides::default(), |key| match key {
            DB_PATH_ENV => Some(" /tmp/env-notes.sqlite3 ".to_string()),
            LOG_LEVEL_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(
            config.store.db_path,
            PathBuf::from("/tmp/env-notes.sqlite3")
        );
        assert_ne!(config.log_level.trim(), "");
    }

    #[test]
    fn overrides_take_precedence_over_environment() {
        let overrides = ConfigOverrides {
            db_path: Some(PathBuf::from("/tmp/flag.sqlite3")),
            log_dir: None,
            log_level: Some("warn".to_string()),
        };
        let config = AppConfig::resolve_with(overrides, |key| match key {
            DB_PATH_ENV => Some("/tmp/env.sqlite3".to_string()),
            LOG_LEVEL_ENV => Some("trace".to_string()),
            _ => None,
        });
        assert_eq!(config.store.db_path, PathBuf::from("/tmp/flag.sqlite3"));
        assert_eq!(config.log_level, "warn");
    }
}
