//! Controllers coordinating remote fetches with local favorites
//!
//! Each controller keeps its state inside a `tokio::sync::watch` channel.
//! Mutations run synchronously inside `send_modify`/`send_if_modified`, so a
//! subscriber only ever observes whole snapshots and no lock is held across an
//! `.await`. Results that come back after the controller moved on (a new
//! detail load, a new filter) are recognized by a generation counter and
//! dropped.

pub mod browser;
pub mod detail;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::{BrowserState, FavoritesBrowser};
pub use detail::{DetailController, DetailState};

/// Favorites shown per page in the browser
pub const FAVORITES_PAGE_SIZE: usize = 15;

/// Cursor over a remote paged resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Next page to request, 1-based
    pub current_page: u32,
    /// False once a fetched page came back empty
    pub has_more_pages: bool,
    /// Set while a page request is in flight
    pub is_fetching: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            current_page: 1,
            has_more_pages: true,
            is_fetching: false,
        }
    }
}

/// Slice bounds of one client-side page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    pub has_more: bool,
}

impl PageWindow {
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Window of `page` (1-based) over `count` items
///
/// `start` is clamped to `count`, so a page past the end is empty.
pub fn paginate(count: usize, page: usize, page_size: usize) -> PageWindow {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(count);
    let end = start.saturating_add(page_size).min(count);
    PageWindow {
        start,
        end,
        has_more: end < count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_defaults() {
        let cursor = PageCursor::default();
        assert_eq!(cursor.current_page, 1);
        assert!(cursor.has_more_pages);
        assert!(!cursor.is_fetching);
    }

    #[test]
    fn test_paginate_full_pages() {
        assert_eq!(
            paginate(30, 1, 15),
            PageWindow { start: 0, end: 15, has_more: true }
        );
        assert_eq!(
            paginate(30, 2, 15),
            PageWindow { start: 15, end: 30, has_more: false }
        );
    }

    #[test]
    fn test_paginate_partial_and_empty() {
        assert_eq!(paginate(20, 2, 15).range(), 15..20);
        assert_eq!(paginate(0, 1, 15), PageWindow { start: 0, end: 0, has_more: false });
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let window = paginate(10, 3, 15);
        assert_eq!(window.range(), 10..10);
        assert!(!window.has_more);
    }
}
