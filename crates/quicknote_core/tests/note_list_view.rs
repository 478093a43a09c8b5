use quicknote_core::{ListEntry, Note, NoteListView, EMPTY_LIST_MESSAGE};

fn note(id: i64, title: &str, body: &str) -> Note {
    Note {
        id,
        title: title.to_string(),
        body: body.to_string(),
    }
}

#[test]
fn refresh_with_no_notes_shows_exactly_one_placeholder() {
    let mut view = NoteListView::new();
    view.refresh(&[]);
    view.refresh(&[]);

    assert_eq!(view.entries(), &[ListEntry::Placeholder]);
    assert!(view.shows_placeholder());
    assert_eq!(view.render_text(), format!("{EMPTY_LIST_MESSAGE}\n"));
}

#[test]
fn refresh_is_idempotent_and_keeps_input_order() {
    let notes = vec![note(1, "a", "x"), note(2, "b", "y")];
    let mut view = NoteListView::new();

    view.refresh(&notes);
    let first = view.clone();
    view.refresh(&notes);

    assert_eq!(view, first);
    let ids = view
        .note_entries()
        .map(|entry| entry.note_id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn refresh_replaces_previous_entries_instead_of_merging() {
    let mut view = NoteListView::new();
    view.refresh(&[note(1, "old", ""), note(2, "old", "")]);

    view.refresh(&[note(3, "new", "")]);

    let ids = view
        .note_entries()
        .map(|entry| entry.note_id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![3]);
    assert!(!view.shows_placeholder());
}

#[test]
fn remove_note_drops_single_entry() {
    let mut view = NoteListView::new();
    view.refresh(&[note(1, "a", ""), note(2, "b", "")]);

    assert!(view.remove_note(1));
    assert!(!view.remove_note(1));

    let ids = view
        .note_entries()
        .map(|entry| entry.note_id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![2]);
}

#[test]
fn removing_last_entry_shows_placeholder() {
    let mut view = NoteListView::new();
    view.refresh(&[note(1, "only", "")]);

    assert!(view.remove_note(1));

    assert_eq!(view.entries(), &[ListEntry::Placeholder]);
}

#[test]
fn entries_carry_their_id_as_delete_key() {
    let mut view = NoteListView::new();
    view.refresh(&[note(7, "seven", "")]);

    let entry = view.note_entries().next().unwrap();
    assert_eq!(entry.delete_key(), "7");
    assert!(view.render_html().contains("data-note-id=\"7\""));
}

#[test]
fn html_escapes_user_text() {
    let mut view = NoteListView::new();
    view.refresh(&[note(1, "<script>", "a & b")]);

    let html = view.render_html();
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("a &amp; b"));
    assert!(!html.contains("<script>"));
}
