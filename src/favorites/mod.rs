//! Persistence gateway for favorite photos
//!
//! Two stores are provided:
//!
//! - [`FjallFavorites`]: durable store on an embedded Fjall keyspace
//! - [`MemoryFavorites`]: process-local store for tests and throwaway sessions
//!
//! Both key records by url, so adding a url that is already stored keeps the
//! existing record instead of creating a duplicate.

pub mod memory;
pub mod partitions;
pub mod store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryFavorites;
pub use store::{FjallFavorites, StoreStats};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key format: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend failure: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// A photo the user marked as favorite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub url: String,
    pub animal_name: String,
}

impl FavoriteRecord {
    pub fn new(url: impl Into<String>, animal_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            animal_name: animal_name.into(),
        }
    }
}

/// Favorite storage shared by the controllers
///
/// Implementations must tolerate concurrent calls from several controllers.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Records in insertion order, optionally restricted to one animal name
    async fn fetch_favorites(&self, animal_name: Option<&str>) -> Result<Vec<FavoriteRecord>>;

    /// Store a favorite; a url that is already stored is left as is
    async fn add_favorite(&self, url: &str, animal_name: &str) -> Result<()>;

    /// Delete a favorite; removing an unknown url succeeds
    async fn remove_favorite(&self, url: &str) -> Result<()>;

    /// Flush pending writes to durable storage
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}
