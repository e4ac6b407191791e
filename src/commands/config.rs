use crate::models::config::AppConfig;
use crate::services::config::ConfigManager;

/// Load configuration, applying a one-off server URL override
pub fn load_config(manager: &ConfigManager, server_override: Option<&str>) -> Result<AppConfig, String> {
    let mut config = manager.load()?;

    if let Some(url) = server_override {
        config.server.base_url = url.to_string();
    }

    Ok(config)
}

/// Effective configuration as pretty JSON
pub fn render_config(config: &AppConfig) -> Result<String, String> {
    serde_json::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))
}

/// Write the defaults to disk unless a config file already exists
pub fn init_config(manager: &ConfigManager) -> Result<bool, String> {
    if manager.config_exists() {
        return Ok(false);
    }

    manager.save(&AppConfig::default())?;
    Ok(true)
}

/// Get config file path
pub fn get_config_path(manager: &ConfigManager) -> String {
    manager
        .config_file_path()
        .to_str()
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_manager(tag: &str) -> ConfigManager {
        let dir = std::env::temp_dir().join(format!(
            "digit-pad-config-cmd-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        ConfigManager::at(dir)
    }

    #[test]
    fn test_load_config_with_override() {
        let manager = temp_manager("override");

        let config = load_config(&manager, Some("http://10.1.1.1:9000")).unwrap();
        assert_eq!(config.server.upload_url(), "http://10.1.1.1:9000/upload");

        let config = load_config(&manager, None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_init_config_only_once() {
        let manager = temp_manager("init");

        assert!(init_config(&manager).unwrap());
        assert!(manager.config_exists());
        assert!(!init_config(&manager).unwrap());
        assert!(get_config_path(&manager).ends_with("config.json"));

        let _ = std::fs::remove_dir_all(manager.config_file_path().parent().unwrap());
    }

    #[test]
    fn test_render_config_round_trips() {
        let config = AppConfig::default();
        let json = render_config(&config).unwrap();

        assert!(json.contains("\"base_url\": \"http://127.0.0.1:5000\""));
        assert_eq!(serde_json::from_str::<AppConfig>(&json).unwrap(), config);
    }
}
