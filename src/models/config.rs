use serde::{Deserialize, Serialize};

/// Classification endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub upload_path: String,
    pub health_path: String,
    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            upload_path: "/upload".to_string(),
            health_path: "/hello".to_string(),
            timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn upload_url(&self) -> String {
        join_url(&self.base_url, &self.upload_path)
    }

    pub fn health_url(&self) -> String {
        join_url(&self.base_url, &self.health_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Drawing surface settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width and height of the square pad in pixels
    pub size: u32,
    pub line_width: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: 280,
            line_width: 18.0,
        }
    }
}

/// Resampling filter used when shrinking the pad to 28x28
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    Bilinear,
}

impl Default for ResizeFilter {
    fn default() -> Self {
        Self::Bilinear
    }
}

/// Recognition settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecognitionConfig {
    pub top_k: usize,
    pub filter: ResizeFilter,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            filter: ResizeFilter::Bilinear,
        }
    }
}

/// History persistence settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    pub file_name: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: crate::models::history::HISTORY_CAPACITY,
            file_name: "history.json".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub canvas: CanvasConfig,
    pub recognition: RecognitionConfig,
    pub history: HistoryConfig,
}
