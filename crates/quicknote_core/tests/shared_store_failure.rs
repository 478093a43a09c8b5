use quicknote_core::db::{init_shared_store, shared_store_state, with_shared_store, DbError};
use quicknote_core::{StoreConfig, StoreState};

#[test]
fn failed_open_is_terminal_for_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let broken = StoreConfig::new(dir.path().join("missing-parent").join("notes.db"));

    let err = init_shared_store(&broken).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
    assert_eq!(shared_store_state(), StoreState::Failed);

    let healthy = StoreConfig::new(dir.path().join("notes.db"));
    let retry = init_shared_store(&healthy).unwrap_err();
    assert!(matches!(retry, DbError::StoreUnavailable(_)));

    let access = with_shared_store(|_| ()).unwrap_err();
    assert!(matches!(access, DbError::StoreUnavailable(_)));
}
