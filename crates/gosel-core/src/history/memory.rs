use super::{upsert, HistoryEntry, HistoryError, HistoryStore};

/// In-process history, used by tests and one-off runs.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history pre-filled with `entries`.
    pub fn with_entries(entries: impl IntoIterator<Item = HistoryEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            upsert(&mut history.entries, entry, usize::MAX);
        }
        history
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl HistoryStore for MemoryHistory {
    fn get(&self, dir: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        Ok(self.entries.iter().find(|e| e.dir == dir).cloned())
    }

    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        upsert(&mut self.entries, entry, usize::MAX);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut history = MemoryHistory::new();
        history.append(HistoryEntry::new("/repo", "TestA", "")).unwrap();
        history.append(HistoryEntry::new("/other", "TestB", "TestX")).unwrap();
        history.append(HistoryEntry::new("/repo", "TestC", "TestY")).unwrap();

        assert_eq!(history.entries().len(), 2);
        let entry = history.get("/repo").unwrap().unwrap();
        assert_eq!(entry.suite, "TestC");
        assert_eq!(entry.method, "TestY");
        assert!(history.get("/missing").unwrap().is_none());
    }
}
