//! Configuration management for the gallery
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use animal_gallery::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Favorites stored at: {}", config.storage.fjall_path.display());
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `ANIMAL_GALLERY__<section>__<key>`
//!
//! Examples:
//! - `ANIMAL_GALLERY__REMOTE__PHOTOS_URL=http://localhost:9000/search`
//! - `ANIMAL_GALLERY__STORAGE__FJALL_PATH=/var/lib/gallery`
//!
//! API keys are read from `ANIMALS_API_KEY` and `PEXELS_API_KEY` only.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/animal_gallery.toml`.
//! This can be overridden using the `ANIMAL_GALLERY_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, LoggingConfig, RemoteConfig, StorageConfig};
pub use validation::ValidationError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or validation
    /// fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Load configuration, reading the TOML file from `path` when given
    pub fn load_with(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = sources::load(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path, without secrets
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
