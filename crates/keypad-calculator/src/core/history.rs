//! Completed calculations
//!
//! Every `=` that applied at least one operator lands here as
//! `expression = result`, newest last.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::format_number;

/// One completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The reduced expression, e.g. `2 + 3 * 4`
    pub expression: String,
    /// The result shown after `=`
    pub result: f64,
    /// Unix epoch millis
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time
    #[must_use]
    pub fn new(expression: impl Into<String>, result: f64) -> Self {
        Self::with_timestamp(expression, result, now_millis())
    }

    /// Creates an entry with a fixed timestamp
    #[must_use]
    pub fn with_timestamp(expression: impl Into<String>, result: f64, timestamp: u64) -> Self {
        Self {
            expression: expression.into(),
            result,
            timestamp,
        }
    }

    /// `expression = result` with the result formatted for display
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, format_number(self.result))
    }
}

fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Bounded log of completed calculations; the oldest entry drops first.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a history with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a history holding at most `capacity` entries
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Appends an entry, evicting the oldest when full
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Records a completed calculation
    pub fn record(&mut self, expression: impl Into<String>, result: f64) {
        self.push(HistoryEntry::new(expression, result));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// The last `n` entries, newest first
    #[must_use]
    pub fn last_n(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Serializes the entries (oldest first) to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Restores a history from JSON produced by [`History::to_json`]
    /// with the default capacity
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Self::from_json_with_capacity(json, Self::DEFAULT_CAPACITY)
    }

    /// Restores a history bounded to `capacity`; only the newest entries
    /// that fit are kept
    pub fn from_json_with_capacity(json: &str, capacity: usize) -> Result<Self, serde_json::Error> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        let mut history = Self::with_capacity(capacity);
        for entry in entries {
            history.push(entry);
        }
        Ok(history)
    }

    /// One `expression = result` line per entry, oldest first
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.entries
            .iter()
            .map(HistoryEntry::display)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> History {
        let mut history = History::new();
        for i in 0..n {
            history.push(HistoryEntry::with_timestamp(
                format!("{i} + 1"),
                (i + 1) as f64,
                i as u64,
            ));
        }
        history
    }

    #[test]
    fn test_entry_display_formats_result() {
        let entry = HistoryEntry::with_timestamp("0.1 + 0.2", 0.3, 0);
        assert_eq!(entry.display(), "0.1 + 0.2 = 0.3");
        let entry = HistoryEntry::with_timestamp("2 + 3 * 4", 20.0, 0);
        assert_eq!(entry.display(), "2 + 3 * 4 = 20");
    }

    #[test]
    fn test_entry_new_has_timestamp() {
        let entry = HistoryEntry::new("1 + 1", 2.0);
        assert!(entry.timestamp > 0);
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = History::default();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), History::DEFAULT_CAPACITY);
        assert!(history.last().is_none());
    }

    #[test]
    fn test_record_and_order() {
        let history = filled(3);
        assert_eq!(history.len(), 3);
        assert_eq!(history.last().unwrap().expression, "2 + 1");
        let newest_first: Vec<_> = history.iter_rev().map(|e| e.result).collect();
        assert_eq!(newest_first, vec![3.0, 2.0, 1.0]);
        let oldest_first: Vec<_> = history.iter().map(|e| e.result).collect();
        assert_eq!(oldest_first, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::with_capacity(2);
        history.record("1 + 1", 2.0);
        history.record("2 + 2", 4.0);
        history.record("3 + 3", 6.0);
        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().next().unwrap().expression, "2 + 2");
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut history = History::with_capacity(0);
        history.record("1 + 1", 2.0);
        assert!(history.is_empty());
    }

    #[test]
    fn test_last_n() {
        let history = filled(5);
        let last_two: Vec<_> = history.last_n(2).iter().map(|e| e.result).collect();
        assert_eq!(last_two, vec![5.0, 4.0]);
        assert_eq!(history.last_n(10).len(), 5);
    }

    #[test]
    fn test_clear() {
        let mut history = filled(3);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let history = filled(2);
        let json = history.to_json().unwrap();
        assert!(json.contains("\"expression\":\"0 + 1\""));
        let restored = History::from_json(&json).unwrap();
        assert_eq!(restored, history);
    }

    #[test]
    fn test_from_json_with_capacity_keeps_newest() {
        let json = filled(5).to_json().unwrap();
        let restored = History::from_json_with_capacity(&json, 2).unwrap();
        assert_eq!(restored.capacity(), 2);
        let results: Vec<_> = restored.iter().map(|e| e.result).collect();
        assert_eq!(results, vec![4.0, 5.0]);

        let mut small = History::with_capacity(3);
        for entry in filled(2).iter() {
            small.push(entry.clone());
        }
        let restored = History::from_json_with_capacity(&small.to_json().unwrap(), 3).unwrap();
        assert_eq!(restored, small);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(History::from_json("not json").is_err());
    }

    #[test]
    fn test_export_formatted() {
        let history = filled(2);
        assert_eq!(history.export_formatted(), "0 + 1 = 1\n1 + 1 = 2");
    }
}
