//! Core logic for QuickNote.
//! A small note store: insert, list, delete, and a list view kept in step.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{AppConfig, ConfigOverrides, StoreConfig};
pub use db::{DbError, DbResult, StoreState};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget, LoggingError,
};
pub use model::note::{parse_note_id, Note, NoteId, NoteIdParseError};
pub use repo::note_repo::{NoteCursor, NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::form_controller::{
    ActionOutcome, DeleteClickEvent, NoteForm, NoteFormController, SubmitEvent,
};
pub use view::note_list::{ListEntry, NoteEntry, NoteListView, EMPTY_LIST_MESSAGE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
