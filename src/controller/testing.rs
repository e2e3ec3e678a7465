//! Scriptable gateways for controller tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, Semaphore};

use crate::catalog::{AnimalDetail, Photo, PhotoPage, PhotoSource};
use crate::context::GalleryContext;
use crate::favorites::{self, FavoriteRecord, FavoritesStore, MemoryFavorites, StorageError};
use crate::remote::{self, RemoteError, RemoteGateway};

/// Page whose photos carry the given large URLs
pub fn photo_page(urls: &[&str]) -> PhotoPage {
    PhotoPage {
        page: Some(1),
        per_page: Some(15),
        total_results: Some(urls.len() as u64),
        next_page: None,
        photos: Some(
            urls.iter()
                .map(|url| Photo {
                    src: Some(PhotoSource {
                        large: Some(url.to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                .collect(),
        ),
    }
}

pub fn detail(name: &str) -> AnimalDetail {
    AnimalDetail {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// Blocks a gateway call until the test releases it
pub struct Gate {
    started: Notify,
    permits: Semaphore,
}

impl Default for Gate {
    fn default() -> Self {
        Self {
            started: Notify::new(),
            permits: Semaphore::new(0),
        }
    }
}

impl Gate {
    async fn pass(&self) {
        self.started.notify_one();
        if let Ok(permit) = self.permits.acquire().await {
            permit.forget();
        }
    }

    /// Wait until a call reached the gate
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.permits.add_permits(1);
    }
}

/// Remote gateway replaying queued responses
///
/// Responses are dequeued when a call starts, so callers get them in call
/// order even when a gate holds them.
#[derive(Default)]
pub struct FakeRemote {
    details: Mutex<VecDeque<remote::Result<AnimalDetail>>>,
    pages: Mutex<VecDeque<remote::Result<PhotoPage>>>,
    detail_calls: Mutex<Vec<String>>,
    image_calls: Mutex<Vec<(String, u32)>>,
    detail_gate: Option<Gate>,
    image_gate: Option<Gate>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            image_gate: Some(Gate::default()),
            ..Self::default()
        }
    }

    /// Gate both detail and image calls
    pub fn fully_gated() -> Self {
        Self {
            detail_gate: Some(Gate::default()),
            image_gate: Some(Gate::default()),
            ..Self::default()
        }
    }

    pub fn push_detail(&self, result: remote::Result<AnimalDetail>) {
        self.details.lock().unwrap().push_back(result);
    }

    pub fn push_page(&self, result: remote::Result<PhotoPage>) {
        self.pages.lock().unwrap().push_back(result);
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    pub fn image_calls(&self) -> Vec<(String, u32)> {
        self.image_calls.lock().unwrap().clone()
    }

    pub fn gate(&self) -> &Gate {
        self.image_gate.as_ref().expect("remote is not gated")
    }

    pub fn detail_gate(&self) -> &Gate {
        self.detail_gate.as_ref().expect("remote details are not gated")
    }
}

#[async_trait]
impl RemoteGateway for FakeRemote {
    async fn fetch_animal_details(&self, name: &str) -> remote::Result<AnimalDetail> {
        self.detail_calls.lock().unwrap().push(name.to_string());
        let next = self.details.lock().unwrap().pop_front();
        if let Some(gate) = &self.detail_gate {
            gate.pass().await;
        }
        next.unwrap_or(Err(RemoteError::NoData))
    }

    async fn fetch_images(&self, query: &str, page: u32) -> remote::Result<PhotoPage> {
        self.image_calls.lock().unwrap().push((query.to_string(), page));
        let next = self.pages.lock().unwrap().pop_front();
        if let Some(gate) = &self.image_gate {
            gate.pass().await;
        }
        next.unwrap_or_else(|| Ok(PhotoPage::default()))
    }
}

/// Memory store with switchable failures and optional gates
///
/// A held fetch reads the store first and then waits at the fetch gate, so
/// its answer predates any write made while it is held.
#[derive(Default)]
pub struct FakeFavorites {
    inner: MemoryFavorites,
    fail_fetch: AtomicBool,
    fail_writes: AtomicBool,
    hold_fetches: AtomicBool,
    fetch_gate: Gate,
    write_gate: Option<Gate>,
    fetch_calls: Mutex<Vec<Option<String>>>,
}

impl FakeFavorites {
    pub fn with_records(records: Vec<FavoriteRecord>) -> Self {
        Self {
            inner: MemoryFavorites::with_records(records),
            ..Self::default()
        }
    }

    pub fn gated() -> Self {
        Self {
            write_gate: Some(Gate::default()),
            ..Self::default()
        }
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent fetches wait at the fetch gate
    pub fn hold_fetches(&self, hold: bool) {
        self.hold_fetches.store(hold, Ordering::SeqCst);
    }

    pub fn fetch_gate(&self) -> &Gate {
        &self.fetch_gate
    }

    pub fn fetch_calls(&self) -> Vec<Option<String>> {
        self.fetch_calls.lock().unwrap().clone()
    }

    pub fn gate(&self) -> &Gate {
        self.write_gate.as_ref().expect("store is not gated")
    }

    async fn before_write(&self) -> favorites::Result<()> {
        if let Some(gate) = &self.write_gate {
            gate.pass().await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FavoritesStore for FakeFavorites {
    async fn fetch_favorites(&self, animal_name: Option<&str>) -> favorites::Result<Vec<FavoriteRecord>> {
        self.fetch_calls
            .lock()
            .unwrap()
            .push(animal_name.map(String::from));
        let result = if self.fail_fetch.load(Ordering::SeqCst) {
            Err(StorageError::Backend("read rejected".to_string()))
        } else {
            self.inner.fetch_favorites(animal_name).await
        };
        if self.hold_fetches.load(Ordering::SeqCst) {
            self.fetch_gate.pass().await;
        }
        result
    }

    async fn add_favorite(&self, url: &str, animal_name: &str) -> favorites::Result<()> {
        self.before_write().await?;
        self.inner.add_favorite(url, animal_name).await
    }

    async fn remove_favorite(&self, url: &str) -> favorites::Result<()> {
        self.before_write().await?;
        self.inner.remove_favorite(url).await
    }
}

pub fn context(remote: Arc<FakeRemote>, favorites: Arc<FakeFavorites>) -> GalleryContext {
    GalleryContext::new(remote, favorites)
}
