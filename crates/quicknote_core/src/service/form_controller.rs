//! Note form controller.
//!
//! # Responsibility
//! - Turn form submissions into inserts and delete clicks into deletes.
//! - Keep the list view in step with committed changes.
//! - Absorb every failure at the point it happens (log and drop).
//!
//! # Invariants
//! - The form is cleared only after the insert has committed.
//! - The view changes only after the underlying transaction has committed.
//! - Without an open store every action is dropped.

use crate::model::note::{parse_note_id, NoteId};
use crate::repo::note_repo::NoteRepository;
use crate::view::note_list::{NoteEntry, NoteListView};
use log::{debug, warn};

/// Current values of the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub body: String,
}

impl NoteForm {
    pub fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
    }
}

/// Submission of the note form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses the host's default submit behavior.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Click on the delete affordance of one list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteClickEvent {
    entry_key: String,
}

impl DeleteClickEvent {
    /// Click carrying the raw text key of the enclosing entry.
    pub fn new(entry_key: impl Into<String>) -> Self {
        Self {
            entry_key: entry_key.into(),
        }
    }

    /// Click on the delete affordance of `entry`.
    pub fn for_entry(entry: &NoteEntry) -> Self {
        Self::new(entry.delete_key())
    }

    pub fn entry_key(&self) -> &str {
        &self.entry_key
    }
}

/// What a user action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Saved(NoteId),
    Deleted(NoteId),
    /// The action failed or could not run; nothing visible changed.
    Dropped,
}

/// Wires the form, the repository and the list view together.
pub struct NoteFormController<R: NoteRepository> {
    repo: Option<R>,
    form: NoteForm,
    view: NoteListView,
}

impl<R: NoteRepository> NoteFormController<R> {
    /// Creates a controller over an open store and renders current notes.
    pub fn new(repo: R) -> Self {
        let mut controller = Self {
            repo: Some(repo),
            form: NoteForm::default(),
            view: NoteListView::new(),
        };
        controller.refresh();
        controller
    }

    /// Creates a controller for a store that failed to open.
    pub fn unavailable() -> Self {
        Self {
            repo: None,
            form: NoteForm::default(),
            view: NoteListView::new(),
        }
    }

    pub fn is_store_available(&self) -> bool {
        self.repo.is_some()
    }

    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NoteForm {
        &mut self.form
    }

    pub fn view(&self) -> &NoteListView {
        &self.view
    }

    /// Rebuilds the view from the full listing.
    ///
    /// Returns `false` and leaves the view untouched when listing fails.
    pub fn refresh(&mut self) -> bool {
        let Some(repo) = self.repo.as_ref() else {
            return false;
        };
        match repo.list_all() {
            Ok(notes) => {
                self.view.refresh(&notes);
                true
            }
            Err(err) => {
                warn!("event=view_refresh module=controller status=error error={err}");
                false
            }
        }
    }

    /// Handles a form submission.
    pub fn on_submit(&mut self, event: &mut SubmitEvent) -> ActionOutcome {
        event.prevent_default();

        let Some(repo) = self.repo.as_mut() else {
            warn!("event=form_submit module=controller status=dropped reason=store_unavailable");
            return ActionOutcome::Dropped;
        };

        match repo.insert_note(&self.form.title, &self.form.body) {
            Ok(note_id) => {
                debug!("event=form_submit module=controller status=ok note_id={note_id}");
                self.form.clear();
                self.refresh();
                ActionOutcome::Saved(note_id)
            }
            Err(err) => {
                warn!("event=form_submit module=controller status=dropped error={err}");
                ActionOutcome::Dropped
            }
        }
    }

    /// Handles a click on an entry's delete affordance.
    pub fn on_delete_click(&mut self, event: &DeleteClickEvent) -> ActionOutcome {
        let note_id = match parse_note_id(event.entry_key()) {
            Ok(note_id) => note_id,
            Err(err) => {
                warn!("event=delete_click module=controller status=dropped error={err}");
                return ActionOutcome::Dropped;
            }
        };

        let Some(repo) = self.repo.as_mut() else {
            warn!("event=delete_click module=controller status=dropped reason=store_unavailable");
            return ActionOutcome::Dropped;
        };

        match repo.delete_note(note_id) {
            Ok(()) => {
                self.view.remove_note(note_id);
                debug!("event=delete_click module=controller status=ok note_id={note_id}");
                ActionOutcome::Deleted(note_id)
            }
            Err(err) => {
                warn!(
                    "event=delete_click module=controller status=dropped note_id={note_id} error={err}"
                );
                ActionOutcome::Dropped
            }
        }
    }
}
