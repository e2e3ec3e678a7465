//! Detail view of one category: animal facts, paged photos, favorite toggles

use std::collections::HashSet;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use super::PageCursor;
use crate::catalog::{AnimalDetail, Category};
use crate::context::GalleryContext;
use crate::error::GalleryError;

/// Observable state of a [`DetailController`]
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub category: Category,
    pub detail: Option<AnimalDetail>,
    /// Large image URLs in page order
    pub images: Vec<String>,
    /// Working set of favorited URLs for `category`
    pub favorites: HashSet<String>,
    pub cursor: PageCursor,
    /// Set while a detail request is pending; page fetches are refused meanwhile
    pub loading_detail: bool,
    pub last_error: Option<GalleryError>,
    // Bumped by every detail load; photo results from an older generation are dropped
    generation: u64,
    // Bumped when the category changes; favorite loads and rollbacks for an older binding are dropped
    binding: u64,
    // Identifies the request holding `cursor.is_fetching`
    fetch_ticket: u64,
}

impl DetailState {
    fn new(category: Category) -> Self {
        Self {
            category,
            detail: None,
            images: Vec::new(),
            favorites: HashSet::new(),
            cursor: PageCursor::default(),
            loading_detail: false,
            last_error: None,
            generation: 0,
            binding: 0,
            fetch_ticket: 0,
        }
    }

    pub fn is_favorite(&self, url: &str) -> bool {
        self.favorites.contains(url)
    }
}

/// Releases `is_fetching` when a page request ends, however it ends
struct FetchGuard<'a> {
    state: &'a watch::Sender<DetailState>,
    ticket: u64,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        let ticket = self.ticket;
        self.state.send_if_modified(|s| {
            if s.cursor.is_fetching && s.fetch_ticket == ticket {
                s.cursor.is_fetching = false;
                true
            } else {
                false
            }
        });
    }
}

/// Clears `loading_detail` if a detail load ends without resetting the cursor
struct DetailLoadGuard<'a> {
    state: &'a watch::Sender<DetailState>,
    generation: u64,
}

impl Drop for DetailLoadGuard<'_> {
    fn drop(&mut self) {
        let generation = self.generation;
        self.state.send_if_modified(|s| {
            if s.loading_detail && s.generation == generation {
                s.loading_detail = false;
                true
            } else {
                false
            }
        });
    }
}

#[derive(Debug, Clone, Copy)]
enum Toggle {
    Add,
    Remove,
}

/// Drives the detail fetch and incremental photo paging for one category
///
/// All methods take `&self`; share the controller behind an `Arc` to trigger
/// operations from several tasks. Gateway failures never escape: they are
/// recorded in [`DetailState::last_error`].
pub struct DetailController {
    ctx: GalleryContext,
    state: watch::Sender<DetailState>,
    // Held by toggles and favorite loads so a load never overwrites an edit it did not read
    favorites_sync: Mutex<()>,
}

impl DetailController {
    /// Create a controller bound to `category` and load its favorites
    pub async fn new(ctx: GalleryContext, category: Category) -> Self {
        let (state, _) = watch::channel(DetailState::new(category));
        let controller = Self {
            ctx,
            state,
            favorites_sync: Mutex::new(()),
        };
        controller.load_favorites().await;
        controller
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> DetailState {
        self.state.borrow().clone()
    }

    pub fn category(&self) -> Category {
        self.state.borrow().category
    }

    pub fn is_favorite(&self, url: &str) -> bool {
        self.state.borrow().is_favorite(url)
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.last_error.take().is_some());
    }

    /// Fetch the detail record for `category`, then the first photo page
    ///
    /// Any page request still in flight is disowned, and no new one starts
    /// until the detail resolves. Switching to another category rebinds the
    /// controller and reloads its favorites.
    pub async fn load_detail(&self, category: Category) {
        let mut generation = 0;
        let mut rebound = false;
        self.state.send_modify(|s| {
            s.generation += 1;
            s.cursor.is_fetching = false;
            s.loading_detail = true;
            if s.category != category {
                s.category = category;
                s.binding += 1;
                s.favorites.clear();
                rebound = true;
            }
            generation = s.generation;
        });
        let _loading = DetailLoadGuard {
            state: &self.state,
            generation,
        };

        if rebound {
            info!(%category, "Controller rebound to new category");
            self.load_favorites().await;
        }

        debug!(%category, generation, "Loading animal detail");
        let result = self.ctx.remote.fetch_animal_details(category.label()).await;

        match result {
            Ok(detail) => {
                let applied = self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.detail = Some(detail);
                    s.images.clear();
                    s.cursor = PageCursor::default();
                    s.loading_detail = false;
                    true
                });

                if applied {
                    self.fetch_next_page().await;
                } else {
                    debug!(%category, generation, "Dropping stale animal detail");
                }
            }
            Err(e) => {
                warn!(%category, error = %e, "Failed to fetch animal detail");
                let error = GalleryError::from(e);
                self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.last_error = Some(error);
                    true
                });
            }
        }
    }

    /// Fetch the next photo page
    ///
    /// No-op while a page request or a detail load is in flight, and after
    /// an empty page.
    pub async fn fetch_next_page(&self) {
        let mut claim = None;
        self.state.send_if_modified(|s| {
            if s.loading_detail || s.cursor.is_fetching || !s.cursor.has_more_pages {
                return false;
            }
            s.cursor.is_fetching = true;
            s.fetch_ticket += 1;
            claim = Some((s.fetch_ticket, s.generation, s.cursor.current_page, s.category));
            true
        });

        let Some((ticket, generation, page, category)) = claim else {
            debug!("Page fetch skipped: busy or exhausted");
            return;
        };
        let _guard = FetchGuard {
            state: &self.state,
            ticket,
        };

        debug!(%category, page, "Fetching photo page");
        match self.ctx.remote.fetch_images(category.label(), page).await {
            Ok(photo_page) => {
                let count = photo_page.item_count();
                let urls = photo_page.image_urls();
                let applied = self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.images.extend(urls);
                    if count > 0 {
                        s.cursor.current_page += 1;
                    }
                    s.cursor.has_more_pages = count > 0;
                    if s.fetch_ticket == ticket {
                        s.cursor.is_fetching = false;
                    }
                    true
                });

                if applied {
                    self.ctx.metrics.page_fetched();
                    debug!(%category, page, count, "Photo page applied");
                } else {
                    debug!(%category, page, "Dropping stale photo page");
                }
            }
            Err(e) => {
                self.ctx.metrics.page_fetch_failed();
                warn!(%category, page, error = %e, "Failed to fetch photo page");
                let error = GalleryError::from(e);
                self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.last_error = Some(error);
                    true
                });
            }
        }
    }

    /// Flip the favorite status of `url`, optimistically
    ///
    /// The working set changes before the store is called and is restored if
    /// the store fails. Returns the favorite status once the store resolved.
    /// A toggle issued during a favorites load waits for that load to land.
    pub async fn toggle_favorite(&self, url: &str) -> bool {
        let _sync = self.favorites_sync.lock().await;
        let mut toggle = Toggle::Add;
        let mut category = Category::Elephant;
        let mut binding = 0;
        self.state.send_modify(|s| {
            toggle = if s.favorites.remove(url) {
                Toggle::Remove
            } else {
                s.favorites.insert(url.to_string());
                Toggle::Add
            };
            category = s.category;
            binding = s.binding;
        });

        let result = match toggle {
            Toggle::Add => self.ctx.favorites.add_favorite(url, category.label()).await,
            Toggle::Remove => self.ctx.favorites.remove_favorite(url).await,
        };

        match (result, toggle) {
            (Ok(()), Toggle::Add) => {
                self.ctx.metrics.favorite_added();
                debug!(url, %category, "Favorite added");
            }
            (Ok(()), Toggle::Remove) => {
                self.ctx.metrics.favorite_removed();
                debug!(url, %category, "Favorite removed");
            }
            (Err(e), toggle) => {
                self.ctx.metrics.rollback();
                warn!(url, ?toggle, error = %e, "Favorite update failed, rolling back");
                let error = GalleryError::from(e);
                self.state.send_modify(|s| {
                    if s.binding == binding {
                        match toggle {
                            Toggle::Add => {
                                s.favorites.remove(url);
                            }
                            Toggle::Remove => {
                                s.favorites.insert(url.to_string());
                            }
                        }
                    }
                    s.last_error = Some(error);
                });
            }
        }

        self.is_favorite(url)
    }

    /// Initialize the working set from stored favorites of the bound category
    ///
    /// On failure the set is left as it was (empty for a fresh controller).
    pub async fn load_favorites(&self) {
        let _sync = self.favorites_sync.lock().await;
        let (category, binding) = {
            let s = self.state.borrow();
            (s.category, s.binding)
        };

        match self.ctx.favorites.fetch_favorites(Some(category.label())).await {
            Ok(records) => {
                let count = records.len();
                self.state.send_if_modified(|s| {
                    if s.binding != binding {
                        return false;
                    }
                    s.favorites = records.into_iter().map(|r| r.url).collect();
                    true
                });
                debug!(%category, count, "Favorites loaded");
            }
            Err(e) => {
                warn!(%category, error = %e, "Failed to load favorites");
                let error = GalleryError::from(e);
                self.state.send_modify(|s| s.last_error = Some(error));
            }
        }
    }
}
