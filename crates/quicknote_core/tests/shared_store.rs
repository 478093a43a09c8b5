use quicknote_core::db::{init_shared_store, shared_store_state, with_shared_store, DbError};
use quicknote_core::{NoteRepository, SqliteNoteRepository, StoreConfig, StoreState};

#[test]
fn shared_store_opens_once_and_serves_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("shared.db"));

    assert_eq!(shared_store_state(), StoreState::Unopened);
    let err = with_shared_store(|_| ()).unwrap_err();
    assert!(matches!(err, DbError::StoreUnavailable(_)));

    init_shared_store(&config).unwrap();
    assert_eq!(shared_store_state(), StoreState::Open);
    init_shared_store(&config).unwrap();

    let other = StoreConfig::new(dir.path().join("other.db"));
    let conflict = init_shared_store(&other).unwrap_err();
    assert!(matches!(conflict, DbError::StoreConflict { .. }));

    let id = with_shared_store(|conn| {
        let mut repo = SqliteNoteRepository::try_new(conn)?;
        repo.insert_note("shared", "handle")
    })
    .unwrap()
    .unwrap();

    let listed = with_shared_store(|conn| {
        let repo = SqliteNoteRepository::try_new(conn)?;
        repo.list_all()
    })
    .unwrap()
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
}
