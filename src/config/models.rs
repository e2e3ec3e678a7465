use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API endpoints and HTTP client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    #[serde(default = "default_animals_url")]
    pub animals_url: String,
    #[serde(default = "default_photos_url")]
    pub photos_url: String,
    /// Animals API key (loaded from environment, not from config file)
    #[serde(skip)]
    pub animals_api_key: Option<String>,
    /// Photo search API key (loaded from environment, not from config file)
    #[serde(skip)]
    pub photos_api_key: Option<String>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            animals_url: default_animals_url(),
            photos_url: default_photos_url(),
            animals_api_key: None,
            photos_api_key: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_animals_url() -> String {
    "https://api.api-ninjas.com/v1/animals".to_string()
}

fn default_photos_url() -> String {
    "https://api.pexels.com/v1/search".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("AnimalGallery/{}", env!("CARGO_PKG_VERSION"))
}

/// Local favorites storage
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_fjall_path")]
    pub fjall_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            fjall_path: default_fjall_path(),
        }
    }
}

fn default_fjall_path() -> PathBuf {
    PathBuf::from("data/favorites")
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}
