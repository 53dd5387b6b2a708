//! Calculation history: entries, the bounded in-memory log, and persistence.

mod store;

pub use store::{HISTORY_FILE_NAME, HistoryError, HistoryStore, JsonFileStore, MemoryStore};

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// One committed calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    expression: String,
    result: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// The expression as it was typed.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The formatted result.
    pub fn result(&self) -> &str {
        &self.result
    }
}

/// Chronological list of calculations, capped at `limit` entries.
///
/// Index 0 is the oldest entry. When the cap is exceeded the oldest
/// entries are dropped first.
#[derive(Clone, Debug)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryLog {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Build a log from previously persisted entries, keeping the newest
    /// `limit` of them.
    pub fn from_entries(entries: Vec<HistoryEntry>, limit: usize) -> Self {
        let mut log = Self { entries, limit };
        log.enforce_limit();
        log
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries in display order (newest first) paired with their
    /// chronological index.
    pub fn newest_first(&self) -> impl Iterator<Item = (usize, &HistoryEntry)> {
        self.entries.iter().enumerate().rev()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Append an entry, dropping the oldest ones if the cap is exceeded.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
        self.enforce_limit();
    }

    /// Remove the entry at chronological `index`.
    pub fn delete_at(&mut self, index: usize) -> Option<HistoryEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn enforce_limit(&mut self) {
        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(format!("{}+0", n), n.to_string())
    }

    #[test]
    fn test_append_keeps_order() {
        let mut log = HistoryLog::default();
        log.append(entry(1));
        log.append(entry(2));

        assert_eq!(log.len(), 2);
        assert_eq!(log.list()[0].result(), "1");
        assert_eq!(log.list()[1].result(), "2");
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut log = HistoryLog::default();
        for n in 1..=DEFAULT_HISTORY_LIMIT {
            log.append(entry(n));
        }
        assert_eq!(log.len(), 200);

        log.append(entry(201));

        assert_eq!(log.len(), 200);
        assert_eq!(log.list().first().unwrap().result(), "2");
        assert_eq!(log.list().last().unwrap().result(), "201");
    }

    #[test]
    fn test_from_entries_truncates() {
        let entries: Vec<_> = (1..=5).map(entry).collect();
        let log = HistoryLog::from_entries(entries, 3);

        let results: Vec<_> = log.list().iter().map(|e| e.result()).collect();
        assert_eq!(results, ["3", "4", "5"]);
    }

    #[test]
    fn test_delete_at() {
        let mut log = HistoryLog::from_entries((1..=3).map(entry).collect(), 10);

        assert_eq!(log.delete_at(1), Some(entry(2)));
        assert_eq!(log.delete_at(5), None);
        assert_eq!(log.list(), &[entry(1), entry(3)]);
    }

    #[test]
    fn test_newest_first_keeps_indices() {
        let log = HistoryLog::from_entries((1..=3).map(entry).collect(), 10);
        let order: Vec<_> = log.newest_first().map(|(i, e)| (i, e.result())).collect();
        assert_eq!(order, [(2, "3"), (1, "2"), (0, "1")]);
    }

    #[test]
    fn test_clear() {
        let mut log = HistoryLog::from_entries((1..=3).map(entry).collect(), 10);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_entry_json_shape() {
        let json = serde_json::to_string(&HistoryEntry::new("12+8", "20")).unwrap();
        assert_eq!(json, r#"{"expression":"12+8","result":"20"}"#);
    }
}
