use super::json_file::{app_dir, JsonFile};
use crate::models::config::HistoryConfig;
use crate::models::history::{History, HistoryEntry};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Durable storage for the recognition history (one JSON file)
pub struct HistoryStore {
    file: JsonFile,
    capacity: usize,
}

impl HistoryStore {
    /// Create a store in the platform data directory
    pub fn new(config: &HistoryConfig) -> Result<Self, String> {
        let data_dir = app_dir(dirs::data_dir(), "data")?;
        Ok(Self::at(data_dir.join(&config.file_name), config.capacity))
    }

    /// Create a store backed by an explicit file
    pub fn at(history_path: PathBuf, capacity: usize) -> Self {
        Self {
            file: JsonFile::new(history_path, "history file"),
            capacity,
        }
    }

    /// Load persisted history
    ///
    /// A missing, unreadable or malformed file yields an empty history.
    pub fn load(&self) -> History {
        match self.file.read::<Vec<HistoryEntry>>() {
            Ok(Some(entries)) => {
                debug!(count = entries.len(), "loaded history");
                History::from_entries(entries, self.capacity)
            }
            Ok(None) => History::with_capacity(self.capacity),
            Err(e) => {
                warn!(path = ?self.file.path(), error = %e, "ignoring unreadable history");
                History::with_capacity(self.capacity)
            }
        }
    }

    /// Persist history, replacing the previous file
    pub fn save(&self, history: &History) -> Result<(), String> {
        self.file.write(history.entries())
    }

    pub fn history_file_path(&self) -> &PathBuf {
        self.file.path()
    }
}
