//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the note data access contract.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Repositories never validate note text; that is a use-case concern.
//! - Repository APIs return semantic errors (`NotFound`, `MissingId`) in
//!   addition to DB transport errors.

pub mod note_repo;
