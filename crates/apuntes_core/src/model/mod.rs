//! Domain model for notes.
//!
//! # Invariants
//! - A note gains its `NoteId` from storage and keeps it for its lifetime.
//! - Notes are a flat collection with no links between them.

pub mod note;
