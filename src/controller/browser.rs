//! Favorites browser: stored favorites, filtered by category and paged locally

use std::collections::BTreeSet;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{FAVORITES_PAGE_SIZE, paginate};
use crate::context::GalleryContext;
use crate::error::GalleryError;
use crate::favorites::FavoriteRecord;

/// Observable state of a [`FavoritesBrowser`]
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserState {
    /// Full result of the last fetch, filter applied
    pub all_favorites: Vec<FavoriteRecord>,
    /// Pages 1..=current_page of `all_favorites`
    pub page_items: Vec<FavoriteRecord>,
    /// Distinct animal names across all favorites, ascending
    pub categories: Vec<String>,
    pub selected_filter: Option<String>,
    pub current_page: usize,
    pub has_more_pages: bool,
    pub last_error: Option<GalleryError>,
    // Bumped by filter changes and resets; older fetch results are dropped
    generation: u64,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            all_favorites: Vec::new(),
            page_items: Vec::new(),
            categories: Vec::new(),
            selected_filter: None,
            current_page: 1,
            has_more_pages: true,
            last_error: None,
            generation: 0,
        }
    }
}

/// Which page window a fetch re-derives
#[derive(Debug, Clone, Copy)]
enum Window {
    /// Rebuild pages 1..=current_page
    Current,
    /// Append the page after current_page
    Next(usize),
}

/// Pages over stored favorites without a server-side offset
///
/// Every fetch re-reads the complete (filtered) set from the store and slices
/// it in memory, so the store's answer, not a cursor, decides what is shown.
pub struct FavoritesBrowser {
    ctx: GalleryContext,
    state: watch::Sender<BrowserState>,
}

impl FavoritesBrowser {
    pub fn new(ctx: GalleryContext) -> Self {
        let (state, _) = watch::channel(BrowserState::default());
        Self { ctx, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> BrowserState {
        self.state.borrow().clone()
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.last_error.take().is_some());
    }

    /// Re-read favorites and re-derive the pages loaded so far
    ///
    /// Pages 1..=current_page are rebuilt from the fresh result in place,
    /// never appended a second time.
    pub async fn load_favorites(&self) {
        self.fetch(Window::Current).await;
    }

    /// Load the distinct animal names across all favorites, ignoring the filter
    pub async fn load_categories(&self) {
        match self.ctx.favorites.fetch_favorites(None).await {
            Ok(records) => {
                let categories: Vec<String> = records
                    .into_iter()
                    .map(|r| r.animal_name)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                debug!(count = categories.len(), "Favorite categories loaded");
                self.state.send_modify(|s| s.categories = categories);
            }
            Err(e) => {
                warn!(error = %e, "Failed to load favorite categories");
                let error = GalleryError::from(e);
                self.state.send_modify(|s| s.last_error = Some(error));
            }
        }
    }

    /// Restrict the view to one animal name, or lift the filter with `None`
    pub async fn filter_favorites(&self, animal_name: Option<&str>) {
        let filter = animal_name.map(String::from);
        self.state.send_modify(|s| s.selected_filter = filter);
        self.reset_pagination().await;
    }

    /// Start over at page 1 with the current filter
    pub async fn reset_pagination(&self) {
        self.state.send_modify(|s| {
            s.generation += 1;
            s.current_page = 1;
            s.page_items.clear();
        });
        self.fetch(Window::Current).await;
    }

    /// Append the next page; no-op once the last page is shown
    pub async fn fetch_next_page(&self) {
        let next = {
            let s = self.state.borrow();
            if !s.has_more_pages {
                debug!("No more favorite pages");
                return;
            }
            s.current_page + 1
        };
        self.fetch(Window::Next(next)).await;
    }

    async fn fetch(&self, window: Window) {
        let (generation, filter) = {
            let s = self.state.borrow();
            (s.generation, s.selected_filter.clone())
        };

        let records = match self.ctx.favorites.fetch_favorites(filter.as_deref()).await {
            Ok(records) => records,
            Err(e) => {
                let error = GalleryError::from(e);
                let current = self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.last_error = Some(error.clone());
                    true
                });
                if current {
                    warn!(filter = ?filter, error = %error, "Failed to fetch favorites");
                } else {
                    debug!(?window, "Dropping stale favorites failure");
                }
                return;
            }
        };

        let applied = self.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            match window {
                Window::Current => {
                    let page = s.current_page.max(1);
                    let window = paginate(records.len(), page, FAVORITES_PAGE_SIZE);
                    s.page_items = records[..window.end].to_vec();
                    s.has_more_pages = window.has_more;
                }
                Window::Next(page) => {
                    // A concurrent call already appended this page
                    if s.current_page + 1 != page {
                        return false;
                    }
                    let window = paginate(records.len(), page, FAVORITES_PAGE_SIZE);
                    s.page_items.extend_from_slice(&records[window.range()]);
                    s.current_page = page;
                    s.has_more_pages = window.has_more;
                }
            }
            s.all_favorites = records;
            true
        });

        if applied {
            debug!(?window, filter = ?filter, "Favorites page applied");
        } else {
            debug!(?window, "Dropping stale favorites fetch");
        }
    }
}
