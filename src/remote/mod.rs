//! Remote data gateway: animal details and paged photo search

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::{AnimalDetail, PhotoPage};

pub use http::HttpRemoteGateway;

/// Photos requested per page
pub const PHOTO_PAGE_SIZE: u32 = 15;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected status: HTTP {0}")]
    Status(u16),

    #[error("Response contained no data")]
    NoData,

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RemoteError>;

/// Remote lookups the detail controller depends on
///
/// Implementations must be safe to call concurrently from several controllers.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Look up the descriptive record for an animal name
    async fn fetch_animal_details(&self, name: &str) -> Result<AnimalDetail>;

    /// Fetch one 1-based page of photos matching `query`
    async fn fetch_images(&self, query: &str, page: u32) -> Result<PhotoPage>;
}
