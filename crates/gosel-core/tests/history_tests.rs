use gosel_core::{FileHistory, HistoryConfig, HistoryEntry, HistoryStore};
use tempfile::TempDir;

fn create_test_history() -> (FileHistory, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = HistoryConfig {
        file: Some(temp_dir.path().join("nested").join("history.json")),
        ..HistoryConfig::default()
    };
    (FileHistory::with_config(&config), temp_dir)
}

#[test]
fn test_missing_file_is_empty() {
    let (history, _temp) = create_test_history();
    assert!(!history.path().exists());
    assert!(history.get("/repo/pkg").unwrap().is_none());
}

#[test]
fn test_append_and_get() {
    let (mut history, _temp) = create_test_history();

    history
        .append(HistoryEntry::new("/repo/pkg", "TestStore", "TestPut"))
        .unwrap();
    assert!(history.path().exists());

    let entry = history.get("/repo/pkg").unwrap().unwrap();
    assert_eq!(entry.suite, "TestStore");
    assert_eq!(entry.method, "TestPut");
    assert!(history.get("/repo").unwrap().is_none());
}

#[test]
fn test_last_write_wins_per_directory() {
    let (mut history, _temp) = create_test_history();

    history
        .append(HistoryEntry::new("/repo/pkg", "TestStore", "TestPut"))
        .unwrap();
    history
        .append(HistoryEntry::new("/repo/other", "TestOther", ""))
        .unwrap();
    history
        .append(HistoryEntry::new("/repo/pkg", "TestPlain", ""))
        .unwrap();

    let entry = history.get("/repo/pkg").unwrap().unwrap();
    assert_eq!(entry.suite, "TestPlain");
    assert_eq!(entry.method, "");
    assert_eq!(history.load().unwrap().len(), 2);
}

#[test]
fn test_persists_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");

    let mut first = FileHistory::at(&path);
    first
        .append(HistoryEntry::new("/repo/pkg", "TestStore", "TestGet"))
        .unwrap();

    let second = FileHistory::at(&path);
    let entry = second.get("/repo/pkg").unwrap().unwrap();
    assert_eq!(entry.method, "TestGet");
}
