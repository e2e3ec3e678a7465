use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{FavoriteRecord, FavoritesStore, Result};

/// In-memory favorites store
#[derive(Debug, Default)]
pub struct MemoryFavorites {
    records: RwLock<Vec<FavoriteRecord>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records, dropping repeated urls
    pub fn with_records(records: impl IntoIterator<Item = FavoriteRecord>) -> Self {
        let mut unique: Vec<FavoriteRecord> = Vec::new();
        for record in records {
            if !unique.iter().any(|r| r.url == record.url) {
                unique.push(record);
            }
        }
        Self {
            records: RwLock::new(unique),
        }
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavorites {
    async fn fetch_favorites(&self, animal_name: Option<&str>) -> Result<Vec<FavoriteRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| animal_name.is_none_or(|name| r.animal_name == name))
            .cloned()
            .collect())
    }

    async fn add_favorite(&self, url: &str, animal_name: &str) -> Result<()> {
        let mut records = self.records.write().await;
        if !records.iter().any(|r| r.url == url) {
            records.push(FavoriteRecord::new(url, animal_name));
            tracing::debug!(url, animal_name, "Favorite stored in memory");
        }
        Ok(())
    }

    async fn remove_favorite(&self, url: &str) -> Result<()> {
        self.records.write().await.retain(|r| r.url != url);
        Ok(())
    }
}
