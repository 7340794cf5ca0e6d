//! Note use-case service.
//!
//! # Responsibility
//! - Validate drafts before they reach storage.
//! - Keep the notes projection in step with storage after every mutation.
//!
//! # Invariants
//! - Each successful add/edit/remove is followed by a full re-read that is
//!   pushed to the projection.
//! - Once a write commits the call returns `Ok`; a failed re-read after it is
//!   logged and leaves the previous snapshot published.
//! - Failed writes leave the projection untouched.
//! - `add_note` stores trimmed text; `edit_note` stores text verbatim and
//!   only rejects empty fields.

use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::projection::notes::{NotesObserver, NotesProjection};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Draft title or content is blank.
    Validation(NoteValidationError),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NoteNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Note service facade over a repository and the list projection.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    projection: NotesProjection,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service with an empty projection. Call `refresh` to load
    /// what is already stored.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            projection: NotesProjection::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns the repository, dropping the projection and its observer.
    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Registers the projection observer, replacing any previous one.
    pub fn subscribe(&mut self, observer: impl NotesObserver + 'static) {
        self.projection.subscribe(observer);
    }

    /// Returns the last published snapshot.
    pub fn notes(&self) -> &[Note] {
        self.projection.current()
    }

    /// Re-reads every note and publishes the list.
    pub fn refresh(&mut self) -> RepoResult<()> {
        let notes = self.repo.list_notes()?;
        self.projection.set(notes);
        Ok(())
    }

    /// Trims, validates and stores a new note, returning it with its
    /// assigned id. Whitespace-only fields are rejected.
    pub fn add_note(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let title = title.into();
        let content = content.into();
        let mut note = Note::new(title.trim(), content.trim());
        note.validate_draft()?;

        let id = self.repo.create_note(&note)?;
        note.id = Some(id);
        self.refresh_after_write("add");
        Ok(note)
    }

    /// Replaces title and content of an existing note. Text is stored as
    /// given; only empty fields are rejected.
    pub fn edit_note(
        &mut self,
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let note = Note::with_id(id, title, content);
        note.validate_draft()?;

        self.repo.update_note(&note)?;
        self.refresh_after_write("edit");
        Ok(note)
    }

    /// Removes a note. Returns `false` when it was already gone.
    pub fn remove_note(&mut self, id: NoteId) -> Result<bool, NoteServiceError> {
        let removed = self.repo.delete_note(&Note::with_id(id, "", ""))?;
        self.refresh_after_write("remove");
        Ok(removed)
    }

    /// Gets one note by id for detail/edit views.
    pub fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.repo.get_note(id)
    }

    // Write is committed; a failed re-read keeps the previous snapshot.
    fn refresh_after_write(&mut self, operation: &'static str) {
        if let Err(err) = self.refresh() {
            warn!(
                "event=projection_refresh module=service status=error operation={} error={}",
                operation, err
            );
        }
    }
}
