//! Retained list view for stored notes.
//!
//! # Responsibility
//! - Project the full note sequence into visible list entries.
//! - Remove single entries after a confirmed delete.
//! - Render the entries as terminal text or HTML markup.
//!
//! # Invariants
//! - The list is never empty: zero notes render as exactly one placeholder.
//! - `refresh` discards every previous entry before rebuilding.

use crate::model::note::{Note, NoteId};
use std::fmt::Write as _;

/// Text shown when no notes are stored.
pub const EMPTY_LIST_MESSAGE: &str = "No notes stored.";

/// One rendered note with its delete affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub note_id: NoteId,
    pub title: String,
    pub body: String,
}

impl NoteEntry {
    /// Text key attached to the entry, resolved again when delete is clicked.
    pub fn delete_key(&self) -> String {
        self.note_id.to_string()
    }
}

/// Visible list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Note(NoteEntry),
    Placeholder,
}

/// Disposable visual projection of the notes collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListView {
    entries: Vec<ListEntry>,
}

impl Default for NoteListView {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteListView {
    /// Creates a view showing the placeholder.
    pub fn new() -> Self {
        Self {
            entries: vec![ListEntry::Placeholder],
        }
    }

    /// Rebuilds the list from `notes`, keeping their order.
    pub fn refresh(&mut self, notes: &[Note]) {
        self.entries.clear();
        self.entries.extend(notes.iter().map(|note| {
            ListEntry::Note(NoteEntry {
                note_id: note.id,
                title: note.title.clone(),
                body: note.body.clone(),
            })
        }));
        if self.entries.is_empty() {
            self.entries.push(ListEntry::Placeholder);
        }
    }

    /// Removes the entry for `note_id`; returns whether one was removed.
    pub fn remove_note(&mut self, note_id: NoteId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !matches!(entry, ListEntry::Note(note) if note.note_id == note_id));
        let removed = self.entries.len() != before;
        if self.entries.is_empty() {
            self.entries.push(ListEntry::Placeholder);
        }
        removed
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Note entries only, in display order.
    pub fn note_entries(&self) -> impl Iterator<Item = &NoteEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            ListEntry::Note(note) => Some(note),
            ListEntry::Placeholder => None,
        })
    }

    pub fn shows_placeholder(&self) -> bool {
        matches!(self.entries.as_slice(), [ListEntry::Placeholder])
    }

    /// Renders one block per entry for terminal output.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry {
                ListEntry::Note(note) => {
                    let _ = writeln!(out, "[{}] {}", note.note_id, note.title);
                    for line in note.body.lines() {
                        let _ = writeln!(out, "    {line}");
                    }
                }
                ListEntry::Placeholder => {
                    let _ = writeln!(out, "{EMPTY_LIST_MESSAGE}");
                }
            }
        }
        out
    }

    /// Renders the list as an HTML `<ul>` fragment.
    pub fn render_html(&self) -> String {
        let mut out = String::from("<ul class=\"notes\">\n");
        for entry in &self.entries {
            match entry {
                ListEntry::Note(note) => {
                    let _ = writeln!(
                        out,
                        "  <li data-note-id=\"{}\"><h3>{}</h3><p>{}</p><button class=\"delete\">Delete</button></li>",
                        note.delete_key(),
                        escape_html(&note.title),
                        escape_html(&note.body)
                    );
                }
                ListEntry::Placeholder => {
                    let _ = writeln!(
                        out,
                        "  <li class=\"placeholder\">{}</li>",
                        escape_html(EMPTY_LIST_MESSAGE)
                    );
                }
            }
        }
        out.push_str("</ul>\n");
        out
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
