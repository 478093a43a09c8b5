//! SQLite storage bootstrap and schema upgrade entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the notes store.
//! - Upgrade the schema to the version requested by the caller.
//! - Own the process-wide store handle used by every operation.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write notes before the upgrade succeeds.
//! - A store never opens at a version lower than the one already on disk.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;
pub mod shared;

pub use open::{open_db, open_db_in_memory};
pub use shared::{init_shared_store, shared_store_state, with_shared_store, StoreState};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Version `0` is never a valid schema version.
    InvalidSchemaVersion,
    /// The caller asked for a version this binary has no migration for.
    UnknownSchemaVersion {
        requested: u32,
        latest_supported: u32,
    },
    /// The file on disk was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The file on disk is already past the requested version.
    VersionDowngrade { requested: u32, db_version: u32 },
    /// The shared store failed to open or was never initialized.
    StoreUnavailable(String),
    /// The shared store is already open on another file.
    StoreConflict { active: PathBuf, requested: PathBuf },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::InvalidSchemaVersion => write!(f, "schema version must be greater than 0"),
            Self::UnknownSchemaVersion {
                requested,
                latest_supported,
            } => write!(
                f,
                "requested schema version {requested} is newer than supported {latest_supported}"
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::VersionDowngrade {
                requested,
                db_version,
            } => write!(
                f,
                "requested schema version {requested} is lower than stored version {db_version}"
            ),
            Self::StoreUnavailable(reason) => write!(f, "notes store unavailable: {reason}"),
            Self::StoreConflict { active, requested } => write!(
                f,
                "notes store already open at `{}`; refusing to switch to `{}`",
                active.display(),
                requested.display()
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
