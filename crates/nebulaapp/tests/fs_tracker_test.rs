use nebulaapp::envelope::STORAGE_KEY;
use nebulaapp::model::{Card, CardKey};
use nebulaapp::store::backend::StorageBackend;
use nebulaapp::store::fs_backend::FsBackend;
use nebulaapp::tracker::{PersistenceMode, Tracker};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn catalog() -> Vec<Card> {
    ["BP01-001", "BP01-002", "PR-107"]
        .iter()
        .enumerate()
        .map(|(i, number)| Card {
            id: Some(i as u64 + 1),
            number: Some(number.to_string()),
            name: Some(format!("Card {number}")),
            ..Default::default()
        })
        .collect()
}

fn open(dir: &Path) -> Tracker<FsBackend> {
    let mut tracker = Tracker::open(FsBackend::new(dir.to_path_buf()));
    tracker.attach_catalog(catalog());
    tracker
}

fn saved(dir: &Path) -> serde_json::Value {
    let path = dir.join(format!("{STORAGE_KEY}.json"));
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_counts_survive_sessions() {
    let dir = TempDir::new().unwrap();
    {
        let mut tracker = open(dir.path());
        let card = tracker.find_card("BP01-001").unwrap().clone();
        tracker.adjust(&card, 3);
    }

    let tracker = open(dir.path());
    assert_eq!(tracker.ledger().get_key(&CardKey::normalize("BP01-001")), 3);
    assert_eq!(
        saved(dir.path()),
        serde_json::json!({"version": 2, "owned": {"BP01-001": 3}})
    );
}

#[test]
fn test_open_does_not_overwrite_saved_state() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    backend
        .write(STORAGE_KEY, r#"{"version":1,"owned":{"PR-107":true}}"#)
        .unwrap();

    let tracker = Tracker::open(FsBackend::new(dir.path().to_path_buf()));
    assert_eq!(tracker.ledger().get_key(&CardKey::normalize("PR-107")), 1);
    // Still the untouched V1 file: opening alone never writes.
    assert_eq!(saved(dir.path())["version"], 1);
}

#[test]
fn test_no_temp_files_left_behind() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(dir.path());
    let card = tracker.find_card("BP01-002").unwrap().clone();
    tracker.toggle(&card);

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_unwritable_data_dir_keeps_changes_in_memory() {
    let dir = TempDir::new().unwrap();
    // A file where the data directory should be.
    let blocked = dir.path().join("data");
    fs::write(&blocked, "not a directory").unwrap();

    let mut tracker = open(&blocked);
    assert_eq!(tracker.mode(), PersistenceMode::InMemoryOnly);
    assert!(!tracker.take_warnings().is_empty());

    let card = tracker.find_card("PR-107").unwrap().clone();
    assert_eq!(tracker.adjust(&card, 10), 8);
    assert_eq!(tracker.ledger().get_key(&CardKey::normalize("PR-107")), 8);
    assert!(tracker.take_warnings().is_empty());
}

#[test]
fn test_corrupt_state_is_left_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(format!("{STORAGE_KEY}.json"));
    fs::write(&path, "{not json").unwrap();

    let mut tracker = open(dir.path());
    assert!(tracker.ledger().is_empty());
    assert_eq!(tracker.mode(), PersistenceMode::InMemoryOnly);
    assert_eq!(tracker.take_warnings().len(), 1);

    let card = tracker.find_card("BP01-001").unwrap().clone();
    tracker.adjust(&card, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");

    // Importing a good file is the way back to a saved collection.
    tracker
        .import_json(br#"{"version":2,"owned":{"BP01-002":2}}"#)
        .unwrap();
    assert_eq!(tracker.mode(), PersistenceMode::Durable);
    assert_eq!(saved(dir.path())["owned"], serde_json::json!({"BP01-002": 2}));
}
