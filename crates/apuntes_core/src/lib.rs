//! Core domain logic for Apuntes.
//! Owns the note entity, its SQLite store, and the list projection fed to UI.

pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use projection::notes::{NotesObserver, NotesProjection};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{NoteService, NoteServiceError};
pub use store::note_store::{NoteStore, StoreError, StoreLocation, StoreState};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
