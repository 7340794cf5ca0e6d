//! Ordered schema steps for the notes database.
//!
//! # Responsibility
//! - Bring a fresh or older `notes.db` up to the latest layout in one
//!   transaction.
//!
//! # Invariants
//! - Version 1 is the layout Android's `SQLiteOpenHelper` creates and stamps
//!   as `user_version = 1`: `notes(_id, title, content)`. Such files are
//!   already current and are opened without running any SQL.
//! - Steps use `IF NOT EXISTS` so an unstamped file holding the table still
//!   migrates cleanly.
//! - Later steps must only add to the layout; existing rows are never
//!   dropped on upgrade.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_notes.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Runs every step above the file's `user_version`, then stamps the latest.
///
/// A current file (including one created by the Android app) is a no-op.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file was written by a newer
///   binary. The data is left untouched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        current_version, latest
    );
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
