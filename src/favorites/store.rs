use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle};
use tracing::{debug, info};

use super::partitions::{
    decode_favorite_key, decode_seq, encode_favorite_key, encode_meta_key, encode_url_key,
};
use super::{FavoriteRecord, FavoritesStore, Result, StorageError};

/// Fjall-backed favorites store
///
/// Records are keyed by a monotonically increasing sequence number so a full
/// scan returns them in insertion order. A second partition indexes url to
/// sequence, which makes adds idempotent and removals a point lookup.
pub struct FjallFavorites {
    keyspace: Keyspace,
    favorites: PartitionHandle,
    urls: PartitionHandle,
    metadata: PartitionHandle,
    // Serializes index check + insert so two adds of one url cannot both land
    next_seq: Mutex<u64>,
}

impl FjallFavorites {
    /// Open or create a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening favorites store at: {}", path.display());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let keyspace = Config::new(path).open()?;

        let favorites = keyspace.open_partition("favorites", PartitionCreateOptions::default())?;
        let urls = keyspace.open_partition("urls", PartitionCreateOptions::default())?;
        let metadata = keyspace.open_partition("metadata", PartitionCreateOptions::default())?;

        let next_seq = match metadata.get(encode_meta_key("next_seq"))? {
            Some(bytes) => decode_seq(&bytes)
                .ok_or_else(|| StorageError::InvalidKey("meta:next_seq".to_string()))?,
            None => 0,
        };

        info!(next_seq, "Favorites store opened");
        Ok(Self {
            keyspace,
            favorites,
            urls,
            metadata,
            next_seq: Mutex::new(next_seq),
        })
    }

    fn lock_seq(&self) -> Result<std::sync::MutexGuard<'_, u64>> {
        self.next_seq
            .lock()
            .map_err(|_| StorageError::Backend("sequence lock poisoned".to_string()))
    }

    fn insert(&self, url: &str, animal_name: &str) -> Result<()> {
        let mut next_seq = self.lock_seq()?;

        if self.urls.get(encode_url_key(url))?.is_some() {
            debug!(url, "Favorite already stored");
            return Ok(());
        }

        let seq = *next_seq;
        let record = FavoriteRecord::new(url, animal_name);
        let value = serde_json::to_vec(&record)?;

        let mut batch = self.keyspace.batch();
        batch.insert(&self.favorites, encode_favorite_key(seq), value);
        batch.insert(&self.urls, encode_url_key(url), seq.to_be_bytes().to_vec());
        batch.insert(
            &self.metadata,
            encode_meta_key("next_seq"),
            (seq + 1).to_be_bytes().to_vec(),
        );
        batch.commit()?;

        *next_seq = seq + 1;
        debug!(seq, url, animal_name, "Favorite stored");
        Ok(())
    }

    fn delete(&self, url: &str) -> Result<()> {
        let _guard = self.lock_seq()?;

        let url_key = encode_url_key(url);
        let Some(value) = self.urls.get(&url_key)? else {
            debug!(url, "Favorite not stored, nothing to remove");
            return Ok(());
        };
        let seq = decode_seq(&value)
            .ok_or_else(|| StorageError::InvalidKey(format!("url index for {}", url)))?;

        let mut batch = self.keyspace.batch();
        batch.remove(&self.favorites, encode_favorite_key(seq));
        batch.remove(&self.urls, url_key);
        batch.commit()?;

        debug!(seq, url, "Favorite removed");
        Ok(())
    }

    fn scan(&self, animal_name: Option<&str>) -> Result<Vec<FavoriteRecord>> {
        let mut records = Vec::new();

        for item in self.favorites.prefix("fav:") {
            let (key, value) = item?;
            if decode_favorite_key(&key).is_none() {
                return Err(StorageError::InvalidKey(
                    String::from_utf8_lossy(&key).to_string(),
                ));
            }

            let record: FavoriteRecord = serde_json::from_slice(&value)?;
            if animal_name.is_none_or(|name| record.animal_name == name) {
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Persist all pending writes to disk
    pub fn persist(&self) -> Result<()> {
        self.keyspace.persist(fjall::PersistMode::SyncAll)?;
        Ok(())
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let mut favorite_count = 0;
        let mut indexed_urls = 0;

        for item in self.favorites.iter() {
            item?;
            favorite_count += 1;
        }

        for item in self.urls.iter() {
            item?;
            indexed_urls += 1;
        }

        Ok(StoreStats {
            favorite_count,
            indexed_urls,
        })
    }
}

#[async_trait]
impl FavoritesStore for FjallFavorites {
    async fn fetch_favorites(&self, animal_name: Option<&str>) -> Result<Vec<FavoriteRecord>> {
        self.scan(animal_name)
    }

    async fn add_favorite(&self, url: &str, animal_name: &str) -> Result<()> {
        self.insert(url, animal_name)
    }

    async fn remove_favorite(&self, url: &str) -> Result<()> {
        self.delete(url)
    }

    async fn flush(&self) -> Result<()> {
        self.persist()
    }
}

#[derive(Debug, Clone)]
pub struct StoreStats {
    pub favorite_count: usize,
    pub indexed_urls: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FjallFavorites, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FjallFavorites::open(temp_dir.path().join("favorites")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_open_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FjallFavorites::open(temp_dir.path().join("favorites"));
        assert!(store.is_ok());
    }

    #[tokio::test]
    async fn test_add_and_fetch_in_insertion_order() {
        let (store, _temp) = create_test_store();

        store.add_favorite("https://img/b.jpg", "Lion").await.unwrap();
        store.add_favorite("https://img/a.jpg", "Tiger").await.unwrap();
        store.add_favorite("https://img/c.jpg", "Lion").await.unwrap();

        let all = store.fetch_favorites(None).await.unwrap();
        let urls: Vec<&str> = all.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://img/b.jpg", "https://img/a.jpg", "https://img/c.jpg"]);

        let lions = store.fetch_favorites(Some("Lion")).await.unwrap();
        assert_eq!(lions.len(), 2);
        assert!(lions.iter().all(|r| r.animal_name == "Lion"));
    }

    #[tokio::test]
    async fn test_add_is_idempotent_by_url() {
        let (store, _temp) = create_test_store();

        store.add_favorite("https://img/1.jpg", "Dog").await.unwrap();
        store.add_favorite("https://img/1.jpg", "Dog").await.unwrap();

        let all = store.fetch_favorites(None).await.unwrap();
        assert_eq!(all, vec![FavoriteRecord::new("https://img/1.jpg", "Dog")]);

        let stats = store.stats().unwrap();
        assert_eq!(stats.favorite_count, 1);
        assert_eq!(stats.indexed_urls, 1);
    }

    #[tokio::test]
    async fn test_remove_favorite() {
        let (store, _temp) = create_test_store();

        store.add_favorite("https://img/1.jpg", "Dog").await.unwrap();
        store.add_favorite("https://img/2.jpg", "Dog").await.unwrap();
        store.remove_favorite("https://img/1.jpg").await.unwrap();

        let all = store.fetch_favorites(None).await.unwrap();
        assert_eq!(all, vec![FavoriteRecord::new("https://img/2.jpg", "Dog")]);

        let stats = store.stats().unwrap();
        assert_eq!(stats.indexed_urls, 1);
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_an_error() {
        let (store, _temp) = create_test_store();
        store.remove_favorite("https://img/missing.jpg").await.unwrap();
    }

    #[tokio::test]
    async fn test_sequence_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("favorites");

        {
            let store = FjallFavorites::open(&path).unwrap();
            store.add_favorite("https://img/1.jpg", "Fox").await.unwrap();
            store.persist().unwrap();
        }

        let store = FjallFavorites::open(&path).unwrap();
        store.add_favorite("https://img/2.jpg", "Fox").await.unwrap();

        let all = store.fetch_favorites(Some("Fox")).await.unwrap();
        let urls: Vec<&str> = all.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://img/1.jpg", "https://img/2.jpg"]);
    }
}
