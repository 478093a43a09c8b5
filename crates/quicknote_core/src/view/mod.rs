//! Visual projections of stored notes.

pub mod note_list;
