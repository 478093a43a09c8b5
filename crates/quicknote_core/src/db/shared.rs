//! Process-wide notes store handle.
//!
//! # Responsibility
//! - Open the notes store once at startup and share it with every operation.
//! - Expose the observed store lifecycle (`Unopened -> Opening -> Open | Failed`).
//!
//! # Invariants
//! - The handle is assigned at most once and never replaced.
//! - A failed open is terminal for the process; no retry is attempted.
//! - Re-initialization with a different database path is rejected.

use super::{open_db, DbError, DbResult};
use crate::config::StoreConfig;
use log::{error, info};
use once_cell::sync::{Lazy, OnceCell};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Observed lifecycle of the shared store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Unopened,
    Opening,
    Open,
    Failed,
}

struct SharedStore {
    db_path: PathBuf,
    conn: Mutex<Connection>,
}

static SHARED_STORE: OnceCell<SharedStore> = OnceCell::new();
static STORE_STATE: Lazy<Mutex<StoreState>> = Lazy::new(|| Mutex::new(StoreState::Unopened));
static OPEN_FAILURE: OnceCell<String> = OnceCell::new();

/// Opens the shared store described by `config`.
///
/// # Invariants
/// - Calling this repeatedly with the same `db_path` is idempotent.
/// - Calling this with a different `db_path` after a successful open is rejected.
/// - After a failed open every call returns `StoreUnavailable`.
pub fn init_shared_store(config: &StoreConfig) -> DbResult<()> {
    let store = SHARED_STORE.get_or_try_init(|| -> DbResult<SharedStore> {
        {
            let mut state = lock_state();
            if *state == StoreState::Failed {
                return Err(DbError::StoreUnavailable(failure_reason()));
            }
            *state = StoreState::Opening;
        }

        match open_db(&config.db_path, config.schema_version) {
            Ok(conn) => {
                *lock_state() = StoreState::Open;
                info!(
                    "event=store_init module=db status=ok db_path={}",
                    config.db_path.display()
                );
                Ok(SharedStore {
                    db_path: config.db_path.clone(),
                    conn: Mutex::new(conn),
                })
            }
            Err(err) => {
                *lock_state() = StoreState::Failed;
                let _ = OPEN_FAILURE.set(err.to_string());
                error!(
                    "event=store_init module=db status=error db_path={} error={}",
                    config.db_path.display(),
                    err
                );
                Err(err)
            }
        }
    })?;

    if store.db_path != config.db_path {
        return Err(DbError::StoreConflict {
            active: store.db_path.clone(),
            requested: config.db_path.clone(),
        });
    }

    Ok(())
}

/// Returns the current lifecycle state of the shared store.
pub fn shared_store_state() -> StoreState {
    *lock_state()
}

/// Runs `f` with exclusive access to the shared connection.
///
/// # Errors
/// - Returns `StoreUnavailable` when the store is not open.
pub fn with_shared_store<T>(f: impl FnOnce(&mut Connection) -> T) -> DbResult<T> {
    let store = SHARED_STORE
        .get()
        .ok_or_else(|| DbError::StoreUnavailable(failure_reason()))?;
    let mut conn = store.conn.lock().map_err(|_| {
        DbError::StoreUnavailable("connection lock poisoned by an earlier panic".to_string())
    })?;
    Ok(f(&mut conn))
}

fn lock_state() -> MutexGuard<'static, StoreState> {
    STORE_STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn failure_reason() -> String {
    OPEN_FAILURE
        .get()
        .cloned()
        .unwrap_or_else(|| "store has not been opened".to_string())
}
