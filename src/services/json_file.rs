use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config and data dirs
pub const APP_DIR: &str = "digit-pad";

/// `<base>/digit-pad`, created if missing
pub fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf, String> {
    let dir = base
        .ok_or_else(|| format!("Failed to determine {} directory", kind))?
        .join(APP_DIR);

    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create {} directory: {}", kind, e))?;

    Ok(dir)
}

/// One pretty-printed JSON document on disk
///
/// `label` names the document in error messages ("config file", "history file").
pub struct JsonFile {
    path: PathBuf,
    label: &'static str,
}

impl JsonFile {
    pub fn new(path: PathBuf, label: &'static str) -> Self {
        Self { path, label }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Parent directory, if the path has a non-empty one
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent().filter(|dir| !dir.as_os_str().is_empty())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Decode the document; `Ok(None)` when the file does not exist
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>, String> {
        if !self.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {}: {}", self.label, e))?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| format!("Failed to parse {}: {}", self.label, e))
    }

    /// Replace the document, creating the parent directory first
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), String> {
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create directory for {}: {}", self.label, e))?;
        }

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| format!("Failed to serialize {}: {}", self.label, e))?;

        fs::write(&self.path, json).map_err(|e| format!("Failed to write {}: {}", self.label, e))
    }
}
