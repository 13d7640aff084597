mod error;
mod file;
mod memory;

pub use error::HistoryError;
pub use file::FileHistory;
pub use memory::MemoryHistory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The last test selected in a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Absolute directory path the selection was made in.
    pub dir: String,
    /// Selected test root.
    pub suite: String,
    /// Selected suite method; empty for flat tests and whole suites.
    #[serde(default)]
    pub method: String,
    pub updated_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(dir: impl Into<String>, suite: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suite: suite.into(),
            method: method.into(),
            updated_at: Utc::now(),
        }
    }
}

/// Trait for selection history backends.
///
/// Holds at most one entry per directory; appending for a directory that
/// already has one replaces it.
pub trait HistoryStore {
    /// Gets the last selection made in `dir`.
    fn get(&self, dir: &str) -> Result<Option<HistoryEntry>, HistoryError>;

    /// Records a selection, replacing any previous one for the same directory.
    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError>;
}

/// Replace the entry for `entry.dir` and keep the newest `max_entries`.
pub(crate) fn upsert(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry, max_entries: usize) {
    entries.retain(|e| e.dir != entry.dir);
    entries.push(entry);
    if entries.len() > max_entries {
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        entries.truncate(max_entries);
    }
}
