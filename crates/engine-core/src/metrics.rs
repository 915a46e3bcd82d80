use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    windows_fetched: AtomicU64,
    records_fetched: AtomicU64,
    records_delivered: AtomicU64,
    fetch_failures: AtomicU64,
}

/// Counters for one scroller. Clones share the same counters.
#[derive(Debug, Clone)]
pub struct ScrollMetrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetricsSnapshot {
    pub windows_fetched: u64,
    pub records_fetched: u64,
    pub records_delivered: u64,
    pub fetch_failures: u64,
}

impl ScrollMetrics {
    pub fn new() -> Self {
        ScrollMetrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    /// Records one successful window fetch carrying `records` records.
    pub fn record_window(&self, records: u64) {
        self.inner.windows_fetched.fetch_add(1, Ordering::Relaxed);
        self.inner
            .records_fetched
            .fetch_add(records, Ordering::Relaxed);
    }

    pub fn increment_delivered(&self) {
        self.inner.records_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failures(&self) {
        self.inner.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ScrollMetricsSnapshot {
        ScrollMetricsSnapshot {
            windows_fetched: self.inner.windows_fetched.load(Ordering::Relaxed),
            records_fetched: self.inner.records_fetched.load(Ordering::Relaxed),
            records_delivered: self.inner.records_delivered.load(Ordering::Relaxed),
            fetch_failures: self.inner.fetch_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for ScrollMetrics {
    fn default() -> Self {
        Self::new()
    }
}
