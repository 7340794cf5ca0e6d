//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/get/update/delete over the `notes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `list_notes` is ordered by `_id ASC`, so creation order is preserved.
//! - Update of an unknown id is an error; delete of an unknown id is a no-op.
//! - `_id` is assigned by SQLite `AUTOINCREMENT` and never reused.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use crate::store::note_store::StoreState;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT
    _id,
    title,
    content
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Update target does not exist.
    NotFound(NoteId),
    /// Update/delete was given a note without an id.
    MissingId,
    /// Create was given a note that already carries an id.
    AlreadyPersisted(NoteId),
    /// Operation attempted on a store handle that is not open.
    StoreNotOpen(StoreState),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::MissingId => write!(f, "note has no id; persist it first"),
            Self::AlreadyPersisted(id) => write!(f, "note already persisted with id {id}"),
            Self::StoreNotOpen(state) => write!(f, "note store is not open (state: {state})"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note CRUD.
pub trait NoteRepository {
    /// Inserts an unpersisted note and returns the id SQLite assigned.
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Returns every stored note ordered by id ascending.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Overwrites title and content of the row addressed by `note.id`.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    /// Removes the row addressed by `note.id`; returns whether a row existed.
    fn delete_note(&self, note: &Note) -> RepoResult<bool>;
}

/// SQLite-backed note repository over a migrated connection.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        if let Some(id) = note.id {
            return Err(RepoError::AlreadyPersisted(id));
        }

        self.conn.execute(
            "INSERT INTO notes (title, content) VALUES (?1, ?2);",
            params![note.title.as_str(), note.content.as_str()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY _id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();

        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE _id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        let id = note.id.ok_or(RepoError::MissingId)?;

        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?1,
                content = ?2
             WHERE _id = ?3;",
            params![note.title.as_str(), note.content.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_note(&self, note: &Note) -> RepoResult<bool> {
        let id = note.id.ok_or(RepoError::MissingId)?;
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE _id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

// Rows written by the Android app may hold NULL text; read those as empty.
fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id: NoteId = row.get("_id")?;
    let title: Option<String> = row.get("title")?;
    let content: Option<String> = row.get("content")?;
    Ok(Note::with_id(
        id,
        title.unwrap_or_default(),
        content.unwrap_or_default(),
    ))
}

impl<R: NoteRepository + ?Sized> NoteRepository for &R {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        (**self).create_note(note)
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        (**self).list_notes()
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        (**self).get_note(id)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        (**self).update_note(note)
    }

    fn delete_note(&self, note: &Note) -> RepoResult<bool> {
        (**self).delete_note(note)
    }
}
