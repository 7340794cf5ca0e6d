use apuntes_core::db::open_db_in_memory;
use apuntes_core::{Note, NoteRepository, RepoError, SqliteNoteRepository};

#[test]
fn create_then_list_returns_first_note_with_id_one() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let id = repo.create_note(&Note::new("A", "B")).unwrap();
    assert_eq!(id, 1);

    let notes = repo.list_notes().unwrap();
    assert_eq!(notes, vec![Note::with_id(1, "A", "B")]);
}

#[test]
fn create_grows_list_by_one_and_id_resolves_to_same_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    repo.create_note(&Note::new("seed", "row")).unwrap();

    let before = repo.list_notes().unwrap().len();
    let id = repo.create_note(&Note::new("Groceries", "milk\neggs")).unwrap();
    let notes = repo.list_notes().unwrap();

    assert_eq!(notes.len(), before + 1);
    let found = notes.iter().find(|note| note.id == Some(id)).unwrap();
    assert_eq!(found.title, "Groceries");
    assert_eq!(found.content, "milk\neggs");
}

#[test]
fn create_accepts_empty_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let id = repo.create_note(&Note::new("", "")).unwrap();
    assert_eq!(repo.get_note(id).unwrap(), Some(Note::with_id(id, "", "")));
}

#[test]
fn create_rejects_note_that_already_has_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let err = repo.create_note(&Note::with_id(9, "A", "B")).unwrap_err();
    assert!(matches!(err, RepoError::AlreadyPersisted(9)));
    assert!(repo.list_notes().unwrap().is_empty());
}

#[test]
fn list_is_ordered_by_id_ascending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    for title in ["c", "a", "b"] {
        repo.create_note(&Note::new(title, "x")).unwrap();
    }

    let ids: Vec<_> = repo
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.id.unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn update_overwrites_only_target_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let first = repo.create_note(&Note::new("one", "1")).unwrap();
    let second = repo.create_note(&Note::new("two", "2")).unwrap();

    repo.update_note(&Note::with_id(first, "uno", "I")).unwrap();

    let notes = repo.list_notes().unwrap();
    assert_eq!(
        notes,
        vec![
            Note::with_id(first, "uno", "I"),
            Note::with_id(second, "two", "2"),
        ]
    );
}

#[test]
fn update_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let err = repo.update_note(&Note::with_id(42, "A", "B")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn update_and_delete_require_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let note = Note::new("A", "B");
    assert!(matches!(
        repo.update_note(&note).unwrap_err(),
        RepoError::MissingId
    ));
    assert!(matches!(
        repo.delete_note(&note).unwrap_err(),
        RepoError::MissingId
    ));
}

#[test]
fn delete_removes_exactly_one_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let first = repo.create_note(&Note::new("First", "x")).unwrap();
    repo.create_note(&Note::new("Second", "y")).unwrap();

    assert!(repo.delete_note(&Note::with_id(first, "First", "x")).unwrap());

    let notes = repo.list_notes().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Second");
}

#[test]
fn delete_unknown_id_is_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    repo.create_note(&Note::new("keep", "me")).unwrap();

    let removed = repo.delete_note(&Note::with_id(77, "", "")).unwrap();
    assert!(!removed);
    assert_eq!(repo.list_notes().unwrap().len(), 1);
}

#[test]
fn deleted_ids_are_never_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let first = repo.create_note(&Note::new("a", "a")).unwrap();
    let second = repo.create_note(&Note::new("b", "b")).unwrap();
    repo.delete_note(&Note::with_id(second, "", "")).unwrap();

    let third = repo.create_note(&Note::new("c", "c")).unwrap();
    assert!(third > second);
    assert!(second > first);
}

#[test]
fn get_missing_note_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    assert_eq!(repo.get_note(1).unwrap(), None);
}
