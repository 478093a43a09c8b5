//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from the controller.
//!
//! # Invariants
//! - Every repository call runs in its own scoped transaction.

pub mod note_repo;
