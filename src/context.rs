use std::sync::Arc;

use crate::config::Config;
use crate::favorites::{FavoritesStore, FjallFavorites};
use crate::observability::Metrics;
use crate::remote::{HttpRemoteGateway, RemoteGateway};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shared handles the controllers are built from
#[derive(Clone)]
pub struct GalleryContext {
    pub remote: Arc<dyn RemoteGateway>,
    pub favorites: Arc<dyn FavoritesStore>,
    pub metrics: Arc<Metrics>,
}

impl GalleryContext {
    pub fn new(remote: Arc<dyn RemoteGateway>, favorites: Arc<dyn FavoritesStore>) -> Self {
        Self {
            remote,
            favorites,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Wire the HTTP gateway and the Fjall store described by `config`
    pub fn from_config(config: &Config) -> Result<Self, AnyError> {
        let remote = HttpRemoteGateway::new(&config.remote)?;
        let favorites = FjallFavorites::open(&config.storage.fjall_path)?;
        Ok(Self::new(Arc::new(remote), Arc::new(favorites)))
    }
}
