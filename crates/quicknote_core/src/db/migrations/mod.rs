//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations up to a requested version atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Upgrades the connection to `target_version`.
///
/// Runs only when the stored version is lower than the target; all pending
/// steps share one transaction so a failed upgrade leaves the old version.
///
/// # Errors
/// - `InvalidSchemaVersion` when `target_version` is `0`.
/// - `UnknownSchemaVersion` when no migration exists for `target_version`.
/// - `UnsupportedSchemaVersion` when the stored version is newer than this binary.
/// - `VersionDowngrade` when the stored version is newer than `target_version`.
pub fn apply_migrations(conn: &mut Connection, target_version: u32) -> DbResult<()> {
    let latest = latest_version();
    if target_version == 0 {
        return Err(DbError::InvalidSchemaVersion);
    }
    if target_version > latest {
        return Err(DbError::UnknownSchemaVersion {
            requested: target_version,
            latest_supported: latest,
        });
    }

    let current_version = current_user_version(conn)?;
    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }
    if current_version > target_version {
        return Err(DbError::VersionDowngrade {
            requested: target_version,
            db_version: current_version,
        });
    }
    if current_version == target_version {
        return Ok(());
    }

    info!(
        "event=schema_upgrade module=db status=start from_version={} to_version={}",
        current_version, target_version
    );
    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version || migration.version > target_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;
    info!(
        "event=schema_upgrade module=db status=ok from_version={} to_version={}",
        current_version, target_version
    );

    Ok(())
}

/// Reads the schema version currently stored in the database file.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
