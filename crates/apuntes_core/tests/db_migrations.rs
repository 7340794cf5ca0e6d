use apuntes_core::db::migrations::latest_version;
use apuntes_core::db::{default_db_path, open_db, open_db_in_memory, DbError, DATABASE_FILE_NAME};
use apuntes_core::{NoteRepository, SqliteNoteRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(
        column_names(&conn, "notes"),
        vec!["_id".to_string(), "title".to_string(), "content".to_string()]
    );
}

#[test]
fn opening_same_database_twice_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = default_db_path(dir.path());
    assert!(path.ends_with(DATABASE_FILE_NAME));

    let conn_first = open_db(&path).unwrap();
    SqliteNoteRepository::new(&conn_first)
        .create_note(&apuntes_core::Note::new("kept", "across opens"))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let notes = SqliteNoteRepository::new(&conn_second).list_notes().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "kept");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn database_written_by_android_app_opens_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (_id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT, content TEXT);
         INSERT INTO notes (title, content) VALUES ('Compra', 'pan');
         INSERT INTO notes (title, content) VALUES (NULL, 'sin titulo');
         PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    let notes = SqliteNoteRepository::new(&conn).list_notes().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, Some(1));
    assert_eq!(notes[0].title, "Compra");
    assert_eq!(notes[1].title, "");
    assert_eq!(notes[1].content, "sin titulo");
}

#[test]
fn unstamped_file_with_notes_table_migrates_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (_id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT, content TEXT);
         INSERT INTO notes (title, content) VALUES ('kept', 'row');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let notes = SqliteNoteRepository::new(&conn).list_notes().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "kept");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn column_names(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}
