//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted entity and its key type.
//! - Convert textual keys (UI attributes, CLI arguments) into numeric ids.
//!
//! # Invariants
//! - `id` is assigned by the store, strictly increasing and never reused.
//! - A note is never mutated after creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned note key.
pub type NoteId = i64;

/// One persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// May be empty.
    pub title: String,
    /// May be empty.
    pub body: String,
}

/// Rejected textual note key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteIdParseError {
    Empty,
    NotNumeric(String),
    NotPositive(i64),
}

impl Display for NoteIdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "note id cannot be empty"),
            Self::NotNumeric(value) => write!(f, "note id `{value}` is not a number"),
            Self::NotPositive(value) => write!(f, "note id {value} must be positive"),
        }
    }
}

impl Error for NoteIdParseError {}

/// Converts a textual key into a numeric note id.
///
/// The key space is strictly numeric, so every key that arrives as text goes
/// through here before lookup or delete.
pub fn parse_note_id(value: &str) -> Result<NoteId, NoteIdParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NoteIdParseError::Empty);
    }
    let id = trimmed
        .parse::<i64>()
        .map_err(|_| NoteIdParseError::NotNumeric(trimmed.to_string()))?;
    if id <= 0 {
        return Err(NoteIdParseError::NotPositive(id));
    }
    Ok(id)
}
