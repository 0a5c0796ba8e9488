//! Integration tests for the file-backed store.

use leasehold_store::{FileStore, SessionStore, StoreError};

// =========================================================================
// Helpers
// =========================================================================

fn store_in(dir: &tempfile::TempDir) -> FileStore {
    FileStore::new(dir.path().join("storage.json"))
}

// =========================================================================
// Basic operations
// =========================================================================

#[test]
fn test_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.get("anything").unwrap(), None);
    assert!(!store.path().exists(), "reading must not create the file");
}

#[test]
fn test_set_creates_file_and_get_reads_it_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.set("leasehold:admin-session", "{\"x\":1}").unwrap();

    assert!(store.path().exists());
    assert_eq!(
        store.get("leasehold:admin-session").unwrap().as_deref(),
        Some("{\"x\":1}")
    );
}

#[test]
fn test_set_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nested/deeper/storage.json"));

    store.set("k", "v").unwrap();

    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_keys_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.remove("a").unwrap();

    assert_eq!(store.get("a").unwrap(), None);
    assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_remove_missing_key_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.remove("k").unwrap();
    store.remove("k").unwrap();
}

// =========================================================================
// Persistence
// =========================================================================

#[test]
fn test_records_survive_reopen() {
    // A new FileStore on the same path is a new "page load": it must see
    // what the previous one wrote.
    let dir = tempfile::tempdir().unwrap();
    store_in(&dir).set("k", "persisted").unwrap();

    let reopened = store_in(&dir);

    assert_eq!(reopened.get("k").unwrap().as_deref(), Some("persisted"));
}

#[test]
fn test_no_temp_file_left_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.set("k", "v").unwrap();

    let mut tmp = store.path().as_os_str().to_owned();
    tmp.push(".tmp");
    assert!(!std::path::Path::new(&tmp).exists());
}

#[test]
fn test_set_leaves_unrelated_sibling_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let sibling = dir.path().join("storage.tmp");
    std::fs::write(&sibling, b"someone else's file").unwrap();

    store.set("k", "v").unwrap();

    assert_eq!(std::fs::read(&sibling).unwrap(), b"someone else's file");
}

#[test]
fn test_store_named_tmp_still_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("session.tmp"));

    store.set("k", "v").unwrap();

    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    assert!(!dir.path().join("session.tmp.tmp").exists());
}

// =========================================================================
// Failure modes
// =========================================================================

#[test]
fn test_corrupt_file_returns_corrupt_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), b"not json at all").unwrap();

    let result = store.get("k");

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}

#[test]
fn test_empty_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), b"").unwrap();

    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn test_path_is_a_directory_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    let result = store.get("k");

    assert!(matches!(result, Err(StoreError::Io { .. })));
}

#[test]
fn test_set_over_corrupt_file_repairs_it() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), br#"{"leasehold:admin-session": "#).unwrap();

    store.set("leasehold:admin-session", "fresh").unwrap();

    assert_eq!(
        store.get("leasehold:admin-session").unwrap().as_deref(),
        Some("fresh")
    );
}

#[test]
fn test_remove_over_corrupt_file_leaves_readable_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), b"not json at all").unwrap();

    store.remove("k").unwrap();

    assert_eq!(store.get("k").unwrap(), None);
}
