use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::HistoryConfig;

use super::{upsert, HistoryEntry, HistoryError, HistoryStore};

/// On-disk layout of the history file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFileContent {
    #[serde(default)]
    entries: Vec<HistoryEntry>,
}

/// JSON file backed history.
///
/// ```text
/// ~/.local/share/gosel/history.json
/// {
///   "entries": [
///     { "dir": "/repo/pkg", "suite": "TestStore", "method": "TestPut", "updated_at": "..." }
///   ]
/// }
/// ```
///
/// The file is read on every lookup and rewritten on every append; a missing
/// file is an empty history.
pub struct FileHistory {
    path: PathBuf,
    max_entries: usize,
}

impl FileHistory {
    /// Creates a FileHistory at the configured (or default) location.
    pub fn with_config(config: &HistoryConfig) -> Self {
        Self {
            path: config.file_or_default(),
            max_entries: config.max_entries.max(1),
        }
    }

    /// Creates a FileHistory at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::with_config(&HistoryConfig {
            file: Some(path.into()),
            ..HistoryConfig::default()
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all entries.
    pub fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path).map_err(|e| HistoryError::io(&self.path, e))?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        let content: HistoryFileContent = serde_json::from_str(&json)?;
        Ok(content.entries)
    }

    fn save(&self, entries: Vec<HistoryEntry>) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| HistoryError::io(parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(&HistoryFileContent { entries })?;
        fs::write(&self.path, json).map_err(|e| HistoryError::io(&self.path, e))?;

        Ok(())
    }
}

impl HistoryStore for FileHistory {
    fn get(&self, dir: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        Ok(self.load()?.into_iter().find(|e| e.dir == dir))
    }

    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        debug!(dir = %entry.dir, suite = %entry.suite, method = %entry.method, "recording selection");
        upsert(&mut entries, entry, self.max_entries);
        self.save(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn entry_aged(dir: &str, minutes: i64) -> HistoryEntry {
        HistoryEntry {
            updated_at: Utc::now() - Duration::minutes(minutes),
            ..HistoryEntry::new(dir, "TestA", "")
        }
    }

    #[test]
    fn test_evicts_oldest_beyond_limit() {
        let temp = TempDir::new().unwrap();
        let config = HistoryConfig {
            file: Some(temp.path().join("history.json")),
            max_entries: 2,
        };
        let mut history = FileHistory::with_config(&config);

        history.append(entry_aged("/old", 30)).unwrap();
        history.append(entry_aged("/mid", 20)).unwrap();
        history.append(entry_aged("/new", 10)).unwrap();

        assert!(history.get("/old").unwrap().is_none());
        assert!(history.get("/mid").unwrap().is_some());
        assert!(history.get("/new").unwrap().is_some());
        assert_eq!(history.load().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_file_is_empty_history() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("history.json");
        fs::write(&path, "").unwrap();
        let history = FileHistory::at(&path);
        assert!(history.get("/repo").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();
        let history = FileHistory::at(&path);
        assert!(matches!(history.get("/repo"), Err(HistoryError::Json(_))));
    }
}
