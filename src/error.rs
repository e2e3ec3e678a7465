use thiserror::Error;

use crate::favorites::StorageError;
use crate::remote::RemoteError;

/// Error recorded by the controllers in `last_error`
///
/// Gateway errors are flattened to their message so the value can live
/// inside cloneable state snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("validation error: {0}")]
    Validation(String),
}

impl GalleryError {
    pub fn code(&self) -> &'static str {
        match self {
            GalleryError::Network(_) => "NETWORK_ERROR",
            GalleryError::Storage(_) => "STORAGE_ERROR",
            GalleryError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<RemoteError> for GalleryError {
    fn from(value: RemoteError) -> Self {
        GalleryError::Network(value.to_string())
    }
}

impl From<StorageError> for GalleryError {
    fn from(value: StorageError) -> Self {
        GalleryError::Storage(value.to_string())
    }
}
