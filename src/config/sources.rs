use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "ANIMAL_GALLERY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/animal_gallery.toml";
const ENV_PREFIX: &str = "ANIMAL_GALLERY";
const ENV_SEPARATOR: &str = "__";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load(path: Option<PathBuf>) -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let config_path = path.unwrap_or_else(|| {
        env::var(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    });

    let mut config = load_from_sources(config_path)?;
    load_secrets(&mut config);

    Ok(config)
}

/// API keys are never read from TOML files, only from the environment
fn load_secrets(config: &mut Config) {
    if let Ok(key) = env::var("ANIMALS_API_KEY") {
        config.remote.animals_api_key = Some(key);
    }
    if let Ok(key) = env::var("PEXELS_API_KEY") {
        config.remote.photos_api_key = Some(key);
    }
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::debug!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // ANIMAL_GALLERY__REMOTE__REQUEST_TIMEOUT_SECS -> remote.request_timeout_secs
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.remote.request_timeout_secs, 30);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[remote]
animals_url = "http://127.0.0.1:9000/animals"
photos_url = "http://127.0.0.1:9000/search"
request_timeout_secs = 5

[storage]
fjall_path = "/tmp/gallery"

[logging]
filter = "animal_gallery=debug"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.remote.animals_url, "http://127.0.0.1:9000/animals");
        assert_eq!(config.remote.request_timeout_secs, 5);
        assert_eq!(config.remote.connect_timeout_secs, 10);
        assert_eq!(config.storage.fjall_path, PathBuf::from("/tmp/gallery"));
        assert_eq!(config.logging.filter, "animal_gallery=debug");
    }

    // Environment overrides are not exercised here: env::set_var is unsafe in
    // multi-threaded test binaries.
}
