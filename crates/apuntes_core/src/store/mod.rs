//! Explicitly scoped note store handles.
//!
//! # Responsibility
//! - Own the single SQLite connection behind an `Unopened -> Open -> Closed`
//!   lifecycle.
//! - Reject CRUD on handles that are not open instead of ignoring it.

pub mod note_store;
