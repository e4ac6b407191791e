use super::json_file::{app_dir, JsonFile};
use crate::models::config::AppConfig;
use std::path::PathBuf;

/// Reads and writes `config.json`; an absent file means defaults
pub struct ConfigManager {
    file: JsonFile,
}

impl ConfigManager {
    /// Manager for `<platform config dir>/digit-pad/config.json`
    pub fn new() -> Result<Self, String> {
        Ok(Self::at(app_dir(dirs::config_dir(), "config")?))
    }

    /// Manager for `config.json` inside `config_dir`
    pub fn at(config_dir: PathBuf) -> Self {
        Self {
            file: JsonFile::new(config_dir.join("config.json"), "config file"),
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), String> {
        self.file.write(config)
    }

    /// Stored configuration, or defaults when nothing was saved yet
    ///
    /// Missing keys fall back to their defaults, so partial files load.
    pub fn load(&self) -> Result<AppConfig, String> {
        Ok(self.file.read()?.unwrap_or_default())
    }

    pub fn config_file_path(&self) -> &PathBuf {
        self.file.path()
    }

    pub fn config_exists(&self) -> bool {
        self.file.exists()
    }
}
