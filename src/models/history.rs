use crate::models::prediction::{Prediction, RankedResult};
use serde::{Deserialize, Serialize};

/// Maximum number of recognitions kept in history
pub const HISTORY_CAPACITY: usize = 10;

/// One past successful recognition
///
/// Serialized with the short keys (`pred`, `top`, `time_ms`, `at`) used by
/// the persisted history file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(rename = "pred")]
    pub prediction: u8,
    #[serde(rename = "top")]
    pub top_k: RankedResult,
    /// Absent when the server did not report a duration
    #[serde(rename = "time_ms", default)]
    pub elapsed_ms: u64,
    #[serde(rename = "at")]
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn from_prediction(prediction: &Prediction, timestamp: impl Into<String>) -> Self {
        Self {
            prediction: prediction.pred,
            top_k: prediction.top.clone(),
            elapsed_ms: prediction.time_ms,
            timestamp: timestamp.into(),
        }
    }

    /// One-line summary, e.g. "2024-05-01 10:00:00 -> 7 (Top1: 7 93%)"
    pub fn summary(&self) -> String {
        match self.top_k.best() {
            Some(best) => format!(
                "{} -> {} (Top1: {} {:.0}%)",
                self.timestamp,
                self.prediction,
                best.digit,
                best.prob * 100.0
            ),
            None => format!("{} -> {}", self.timestamp, self.prediction),
        }
    }
}

/// Bounded list of recent recognitions, newest first
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Build from persisted entries, dropping anything past capacity
    pub fn from_entries(mut entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Prepend an entry and truncate to capacity
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
