//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted entity (`id`, `title`, `content`).
//! - Provide draft validation used by the use-case layer before writes.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on insert.
//! - Update and delete address a note by `id` and never change it.
//! - Storage itself accepts empty title/content; only drafts are validated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned row identifier. Monotonic and never reused.
pub type NoteId = i64;

/// Draft validation failures for user-submitted notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::EmptyContent => write!(f, "note content must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// A short text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// `None` for a note that has not been persisted yet.
    pub id: Option<NoteId>,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Creates an unpersisted note.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Creates a note handle for an already persisted row.
    pub fn with_id(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns whether storage has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Checks that title and content are both non-empty.
    ///
    /// Whitespace counts as text; callers that want blank input rejected
    /// trim first (see `NoteService::add_note`).
    ///
    /// # Errors
    /// - `EmptyTitle` is reported before `EmptyContent` when both are empty.
    pub fn validate_draft(&self) -> Result<(), NoteValidationError> {
        if self.title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }
}
