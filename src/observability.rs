//! Logging setup and in-process counters

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (tests, embedding apps)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    pages_fetched: AtomicU64,
    page_fetch_failures: AtomicU64,
    favorites_added: AtomicU64,
    favorites_removed: AtomicU64,
    rollbacks: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "pages_fetched", "Metric incremented");
    }

    pub fn page_fetch_failed(&self) {
        self.page_fetch_failures.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "page_fetch_failures", "Metric incremented");
    }

    pub fn favorite_added(&self) {
        self.favorites_added.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "favorites_added", "Metric incremented");
    }

    pub fn favorite_removed(&self) {
        self.favorites_removed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "favorites_removed", "Metric incremented");
    }

    pub fn rollback(&self) {
        self.rollbacks.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "rollbacks", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            page_fetch_failures: self.page_fetch_failures.load(Ordering::Relaxed),
            favorites_added: self.favorites_added.load(Ordering::Relaxed),
            favorites_removed: self.favorites_removed.load(Ordering::Relaxed),
            rollbacks: self.rollbacks.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub pages_fetched: u64,
    pub page_fetch_failures: u64,
    pub favorites_added: u64,
    pub favorites_removed: u64,
    pub rollbacks: u64,
}
