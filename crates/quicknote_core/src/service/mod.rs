//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and view updates for user actions.
//! - Keep the CLI layer decoupled from storage details.

pub mod form_controller;
