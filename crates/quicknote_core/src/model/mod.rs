//! Domain model for stored notes.
//!
//! # Responsibility
//! - Define canonical data structures used by core logic.
//!
//! # Invariants
//! - Every note is identified by a store-assigned `NoteId`.
//! - Deletion is a hard delete; ids are not reused afterwards.

pub mod note;
