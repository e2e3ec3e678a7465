pub mod catalog;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod favorites;
pub mod observability;
pub mod remote;

pub use context::GalleryContext;
pub use error::GalleryError;
