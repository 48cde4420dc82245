use chrono::Utc;
use monogatari_core::store::{ensure_extension, is_project_path, PROJECT_EXTENSION};
use monogatari_core::{FsProjectStore, ProjectStore, Session, StoreError};
use std::fs;

#[test]
fn write_then_read_roundtrips_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("novel.mnproj");
    let store = FsProjectStore::new();

    store.write_text(&path, "<Project>\n物語\n</Project>\n").unwrap();
    assert_eq!(store.read_text(&path).unwrap(), "<Project>\n物語\n</Project>\n");

    store.write_text(&path, "second").unwrap();
    assert_eq!(store.read_text(&path).unwrap(), "second");

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "temporary file must not remain");
}

#[test]
fn missing_and_non_utf8_files_map_to_typed_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsProjectStore::new();

    let missing = dir.path().join("nope.mnproj");
    assert!(matches!(store.read_text(&missing), Err(StoreError::NotFound(_))));

    let binary = dir.path().join("bin.mnproj");
    fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
    assert!(matches!(store.read_text(&binary), Err(StoreError::Encoding(_))));
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsProjectStore::new();
    let path = dir.path().join("absent").join("x.mnproj");
    assert!(matches!(
        store.write_text(&path, "x"),
        Err(StoreError::Write { .. })
    ));
}

#[test]
fn unique_path_appends_a_counter() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsProjectStore::new();
    let path = ensure_extension(&dir.path().join("Untitled"), PROJECT_EXTENSION);
    assert_eq!(path, dir.path().join("Untitled.mnproj"));
    assert_eq!(store.unique_path(&path), path);

    store.write_text(&path, "a").unwrap();
    let next = store.unique_path(&path);
    assert_eq!(next, dir.path().join("Untitled (1).mnproj"));
    store.write_text(&next, "b").unwrap();
    assert_eq!(
        store.unique_path(&path),
        dir.path().join("Untitled (2).mnproj")
    );
    assert!(is_project_path(&next));
}

#[test]
fn session_saved_to_disk_reopens_clean() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("story.mnproj");
    let store = FsProjectStore::new();

    let mut session = Session::new();
    session.new_document();
    session.document_mut().view.buffer = "Line one\r\nline two".to_string();
    session.save_to(&store, &path, Utc::now()).unwrap();

    let mut reopened = Session::new();
    reopened.open_text(&store.read_text(&path).unwrap());
    assert_eq!(reopened.document().view.buffer, "Line one\r\nline two");
    assert!(!reopened.has_unsaved_changes());
}
