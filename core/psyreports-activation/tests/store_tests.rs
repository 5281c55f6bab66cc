use pretty_assertions::assert_eq;
use psyreports_activation::{ActivationError, FileStore, KeyValueStore, MemoryStore};
use std::fs;

#[test]
fn memory_store_set_get_remove() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("k"), None);
    store.set("k", "v1").unwrap();
    store.set("k", "v2").unwrap();
    assert_eq!(store.get("k").as_deref(), Some("v2"));
    store.remove("k").unwrap();
    assert_eq!(store.get("k"), None);
    store.remove("k").unwrap();
}

#[test]
fn file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get("anything"), None);
    assert!(!path.exists());
}

#[test]
fn file_store_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let mut store = FileStore::open(&path).unwrap();
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.remove("a").unwrap();

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get("a"), None);
    assert_eq!(reopened.get("b").as_deref(), Some("2"));
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn file_store_writes_flat_json_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mut store = FileStore::open(&path).unwrap();
    store.set("psyreports_device_id", "DEV-ABC123").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value, serde_json::json!({ "psyreports_device_id": "DEV-ABC123" }));
}

#[test]
fn file_store_empty_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "  \n").unwrap();
    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get("k"), None);
}

#[test]
fn file_store_corrupt_file_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "[1, 2, 3]").unwrap();
    let err = FileStore::open(&path).unwrap_err();
    assert!(matches!(err, ActivationError::Storage(_)));
}

#[test]
fn file_store_flush_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mut store = FileStore::open(&path).unwrap();
    store.set("k", "v").unwrap();
    store.set("k", "w").unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
    assert_eq!(FileStore::open(&path).unwrap().get("k").as_deref(), Some("w"));
}
