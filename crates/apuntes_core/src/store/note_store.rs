//! Note store lifecycle handle.
//!
//! # Responsibility
//! - Pair connection acquisition (`open`) with release (`close`/drop).
//! - Expose the note CRUD surface while the handle is open.
//!
//! # Invariants
//! - `Open` is the only state in which CRUD succeeds.
//! - `Closed` is terminal; a new handle is needed to reopen storage.
//! - One handle backs exactly one connection; there is no pooling.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Where a store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// SQLite database file; created on first open.
    File(PathBuf),
    /// Private in-memory database, discarded on close.
    Memory,
}

impl StoreLocation {
    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

/// Observable lifecycle state of a [`NoteStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Unopened,
    Open,
    Closed,
}

impl Display for StoreState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Unopened => "unopened",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// Lifecycle errors raised by `open`/`close`/`with_open`.
#[derive(Debug)]
pub enum StoreError {
    /// Connection could not be acquired or bootstrapped.
    Open(DbError),
    /// SQLite reported an error while releasing the connection.
    Close(rusqlite::Error),
    /// `open` or `close` called from a state that does not allow it.
    InvalidTransition {
        from: StoreState,
        action: &'static str,
    },
    /// Failure raised by work performed inside `with_open`.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open note store: {err}"),
            Self::Close(err) => write!(f, "failed to close note store: {err}"),
            Self::InvalidTransition { from, action } => {
                write!(f, "cannot {action} a note store that is {from}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) => Some(err),
            Self::Close(err) => Some(err),
            Self::InvalidTransition { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

enum Handle {
    Unopened,
    Open(Connection),
    Closed,
}

/// Single-connection note store with an explicit open/close lifecycle.
pub struct NoteStore {
    location: StoreLocation,
    handle: Handle,
}

impl NoteStore {
    /// Creates an unopened handle for `location`. No I/O happens here.
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            handle: Handle::Unopened,
        }
    }

    /// Opens `location`, runs `work`, and closes the store on every path.
    ///
    /// An error from `work` takes precedence over a close error.
    pub fn with_open<T, F>(location: StoreLocation, work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&NoteStore) -> RepoResult<T>,
    {
        let mut store = Self::new(location);
        store.open()?;
        let outcome = work(&store);
        let closed = store.close();
        let value = outcome?;
        closed?;
        Ok(value)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    pub fn state(&self) -> StoreState {
        match self.handle {
            Handle::Unopened => StoreState::Unopened,
            Handle::Open(_) => StoreState::Open,
            Handle::Closed => StoreState::Closed,
        }
    }

    /// Acquires the connection and bootstraps the schema.
    ///
    /// # Errors
    /// - `InvalidTransition` unless the handle is `Unopened`.
    /// - `Open` when SQLite cannot open or migrate the database; the handle
    ///   stays `Unopened` so the caller may retry.
    pub fn open(&mut self) -> Result<(), StoreError> {
        if !matches!(self.handle, Handle::Unopened) {
            return Err(StoreError::InvalidTransition {
                from: self.state(),
                action: "open",
            });
        }

        let conn = match &self.location {
            StoreLocation::File(path) => open_db(path),
            StoreLocation::Memory => open_db_in_memory(),
        }
        .map_err(StoreError::Open)?;

        self.handle = Handle::Open(conn);
        info!(
            "event=store_open module=store status=ok mode={}",
            self.location.mode()
        );
        Ok(())
    }

    /// Releases the connection. The handle is `Closed` afterwards even when
    /// SQLite reports a close error.
    ///
    /// # Errors
    /// - `InvalidTransition` unless the handle is `Open`.
    pub fn close(&mut self) -> Result<(), StoreError> {
        let conn = match std::mem::replace(&mut self.handle, Handle::Closed) {
            Handle::Open(conn) => conn,
            other => {
                let from = match other {
                    Handle::Unopened => StoreState::Unopened,
                    _ => StoreState::Closed,
                };
                self.handle = other;
                return Err(StoreError::InvalidTransition {
                    from,
                    action: "close",
                });
            }
        };

        match conn.close() {
            Ok(()) => {
                info!(
                    "event=store_close module=store status=ok mode={}",
                    self.location.mode()
                );
                Ok(())
            }
            Err((_conn, err)) => {
                error!(
                    "event=store_close module=store status=error mode={} error={}",
                    self.location.mode(),
                    err
                );
                Err(StoreError::Close(err))
            }
        }
    }

    /// Inserts `note` and returns its assigned id.
    pub fn create(&self, note: &Note) -> RepoResult<NoteId> {
        let id = self.repository()?.create_note(note)?;
        debug!("event=note_create module=store status=ok note_id={id}");
        Ok(id)
    }

    /// Returns every note ordered by id ascending.
    pub fn list_all(&self) -> RepoResult<Vec<Note>> {
        self.repository()?.list_notes()
    }

    pub fn get(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.repository()?.get_note(id)
    }

    /// Overwrites title/content of the addressed note.
    ///
    /// # Errors
    /// - `NotFound` when no row has `note.id`.
    pub fn update(&self, note: &Note) -> RepoResult<()> {
        let result = self.repository()?.update_note(note);
        match (&result, note.id) {
            (Ok(()), Some(id)) => {
                debug!("event=note_update module=store status=ok note_id={id}");
            }
            (Err(RepoError::NotFound(id)), _) => {
                warn!("event=note_update module=store status=not_found note_id={id}");
            }
            _ => {}
        }
        result
    }

    /// Deletes the addressed note. Unknown ids are a no-op returning `false`.
    pub fn delete(&self, note: &Note) -> RepoResult<bool> {
        let removed = self.repository()?.delete_note(note)?;
        debug!(
            "event=note_delete module=store status=ok note_id={} removed={}",
            note.id.unwrap_or_default(),
            removed
        );
        Ok(removed)
    }

    fn repository(&self) -> RepoResult<SqliteNoteRepository<'_>> {
        match &self.handle {
            Handle::Open(conn) => Ok(SqliteNoteRepository::new(conn)),
            _ => Err(RepoError::StoreNotOpen(self.state())),
        }
    }
}

impl NoteRepository for NoteStore {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        self.create(note)
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        self.list_all()
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.get(id)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        self.update(note)
    }

    fn delete_note(&self, note: &Note) -> RepoResult<bool> {
        self.delete(note)
    }
}

// Dropping the connection closes it without reporting errors.
impl Drop for NoteStore {
    fn drop(&mut self) {
        if let Handle::Open(_) = self.handle {
            info!(
                "event=store_close module=store status=implicit mode={} reason=drop",
                self.location.mode()
            );
        }
    }
}
