//! Storage bootstrap for the single `notes` table.
//!
//! # Responsibility
//! - Hand out connections whose `notes` table is ready for CRUD.
//! - Locate the notes file inside an app data directory.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`, the same slot Android's
//!   `SQLiteOpenHelper` stamps, so files from either side agree on it.
//! - A file stamped by a newer binary is refused, never rewritten.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// File name used for the notes database inside an app data directory.
pub const DATABASE_FILE_NAME: &str = "notes.db";

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open or prepare the notes database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer schema than this build knows.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Returns the notes database path inside `data_dir`.
pub fn default_db_path(data_dir: impl AsRef<Path>) -> PathBuf {
    data_dir.as_ref().join(DATABASE_FILE_NAME)
}
