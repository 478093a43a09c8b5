use quicknote_core::{init_logging, init_stderr_logging, logging_status, LogTarget, LoggingError};

#[test]
fn stderr_logging_is_installed_once_and_guards_reconfiguration() {
    assert!(logging_status().is_none());

    init_stderr_logging("warn").unwrap();
    init_stderr_logging("WARNING").unwrap();
    assert_eq!(logging_status(), Some(("warn", LogTarget::Stderr)));

    let level_err = init_stderr_logging("debug").unwrap_err();
    assert!(matches!(level_err, LoggingError::Conflict { .. }));

    let dir = tempfile::tempdir().unwrap();
    let target_err = init_logging("warn", dir.path()).unwrap_err();
    assert!(matches!(target_err, LoggingError::Conflict { .. }));

    log::warn!("event=logging_test module=tests status=ok");
    assert_eq!(logging_status(), Some(("warn", LogTarget::Stderr)));
}
