use crate::{
    error::ScrollError,
    metrics::ScrollMetrics,
    settings::{RefillMode, ScrollSettings},
};
use connectors::{error::FetchError, fetcher::WindowFetcher};
use model::pagination::range::ItemRange;
use std::{collections::VecDeque, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub mod advance;
pub mod search;
pub mod stream;

pub use advance::{Advance, ScrollState};

/// Pull iterator over the results of one search, fetched a window at a time.
///
/// The scroller keeps at most one window of records in memory. A window that
/// comes back shorter than requested is the only end-of-results signal: a
/// full window is always followed by one more fetch, and that fetch's size
/// decides whether scrolling continues. The reported total count is never
/// consulted for termination.
///
/// ```ignore
/// let mut scroller = ResultScroller::open(fetcher, "search-id", total, settings, &cancel).await?;
/// while scroller.has_next(&cancel).await {
///     let record = scroller.next_record();
/// }
/// ```
pub struct ResultScroller<R> {
    fetcher: Arc<dyn WindowFetcher<R>>,
    search_id: String,
    total_count: u64,
    window: usize,
    mode: RefillMode,

    // Absolute index of the first record in `cached`'s window.
    window_start: usize,
    // Absolute index of the next record handed out.
    cursor: usize,
    // Unconsumed tail of the current window.
    cached: VecDeque<R>,
    // Size of the current window as fetched.
    cached_len: usize,

    exhausted: bool,
    primed: bool,
    metrics: ScrollMetrics,
}

impl<R: Send + 'static> ResultScroller<R> {
    /// Creates a scroller and eagerly fetches its first window.
    ///
    /// Fails if the first fetch fails; no scroller is produced in that case.
    pub async fn open(
        fetcher: Arc<dyn WindowFetcher<R>>,
        search_id: impl Into<String>,
        total_count: u64,
        settings: ScrollSettings,
        cancel: &CancellationToken,
    ) -> Result<Self, ScrollError> {
        if settings.window == 0 {
            return Err(ScrollError::InvalidWindow);
        }

        let mut scroller = ResultScroller {
            fetcher,
            search_id: search_id.into(),
            total_count,
            window: settings.window,
            mode: settings.mode,
            window_start: 0,
            cursor: 0,
            cached: VecDeque::new(),
            cached_len: 0,
            exhausted: false,
            primed: false,
            metrics: ScrollMetrics::new(),
        };

        let first = ItemRange::window(0, scroller.window)
            .map_err(FetchError::from)
            .map_err(|source| scroller.construction_error(source))?;
        let records = scroller
            .fetch_window(first, cancel)
            .await
            .map_err(|source| scroller.construction_error(source))?;
        scroller.load(records);

        debug!(
            "Opened scroller for search {} ({} records reported, window {})",
            scroller.search_id, scroller.total_count, scroller.window
        );
        Ok(scroller)
    }

    /// Decides whether another record is available, refilling the window if
    /// the current one is used up.
    ///
    /// Performs at most one window fetch. Once [`Advance::Exhausted`] has been
    /// returned, every later call returns it again without fetching.
    pub async fn advance(&mut self, cancel: &CancellationToken) -> Advance {
        self.primed = false;

        loop {
            match self.state() {
                ScrollState::Ready => {
                    self.primed = true;
                    return Advance::HasMore;
                }
                ScrollState::Exhausted => {
                    self.mark_exhausted();
                    return Advance::Exhausted;
                }
                ScrollState::NeedsRefill => {
                    if let Err(err) = self.refill(cancel).await {
                        return match self.mode {
                            RefillMode::Lossy => {
                                warn!(
                                    "Discarding refill failure for search {} at record {}: {}",
                                    self.search_id, self.cursor, err
                                );
                                self.mark_exhausted();
                                Advance::Exhausted
                            }
                            RefillMode::Strict => Advance::FetchFailed(err),
                        };
                    }
                }
            }
        }
    }

    /// [`advance`](Self::advance) reduced to a boolean.
    pub async fn has_next(&mut self, cancel: &CancellationToken) -> bool {
        self.advance(cancel).await.has_more()
    }

    /// Hands out the record at the cursor.
    ///
    /// # Panics
    ///
    /// Panics unless the preceding [`advance`](Self::advance) or
    /// [`has_next`](Self::has_next) call reported another record.
    pub fn next_record(&mut self) -> R {
        assert!(
            self.primed,
            "next_record called on search {} without a preceding successful has_next",
            self.search_id
        );
        self.primed = false;

        let record = self
            .cached
            .pop_front()
            .expect("primed scroller has an unconsumed record");
        self.cursor += 1;
        self.metrics.increment_delivered();

        if self.cursor as u64 == self.total_count.saturating_add(1) {
            debug!(
                "Search {} delivered more records than the {} reported",
                self.search_id, self.total_count
            );
        }

        record
    }

    pub fn state(&self) -> ScrollState {
        if self.exhausted {
            return ScrollState::Exhausted;
        }

        let consumed = self.cursor - self.window_start;
        if consumed < self.cached_len {
            ScrollState::Ready
        } else if self.cached_len < self.window {
            ScrollState::Exhausted
        } else {
            ScrollState::NeedsRefill
        }
    }

    pub fn search_id(&self) -> &str {
        &self.search_id
    }

    /// Record count reported when the scroller was opened. Advisory only.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> RefillMode {
        self.mode
    }

    pub fn metrics(&self) -> &ScrollMetrics {
        &self.metrics
    }

    async fn refill(&mut self, cancel: &CancellationToken) -> Result<(), FetchError> {
        let next_start = self.window_start + self.window;
        let range = ItemRange::window(next_start, self.window)?;

        let records = self.fetch_window(range, cancel).await?;
        self.window_start = next_start;
        self.load(records);

        Ok(())
    }

    async fn fetch_window(
        &self,
        range: ItemRange,
        cancel: &CancellationToken,
    ) -> Result<Vec<R>, FetchError> {
        match self.fetcher.fetch(&self.search_id, range, cancel).await {
            Ok(mut records) => {
                if records.len() > self.window {
                    warn!(
                        "Fetcher returned {} records for {} of search {}; keeping {}",
                        records.len(),
                        range,
                        self.search_id,
                        self.window
                    );
                    records.truncate(self.window);
                }

                debug!(
                    "Fetched window {} of search {}: {} records",
                    range,
                    self.search_id,
                    records.len()
                );
                self.metrics.record_window(records.len() as u64);
                Ok(records)
            }
            Err(err) => {
                self.metrics.increment_failures();
                Err(err)
            }
        }
    }

    fn load(&mut self, records: Vec<R>) {
        self.cached_len = records.len();
        self.cached = records.into();
    }

    fn mark_exhausted(&mut self) {
        if !self.exhausted {
            self.exhausted = true;
            self.cached.clear();
            debug!(
                "Search {} exhausted after {} records",
                self.search_id, self.cursor
            );
        }
    }

    fn construction_error(&self, source: FetchError) -> ScrollError {
        ScrollError::Construction {
            search_id: self.search_id.clone(),
            source,
        }
    }
}

impl<R> std::fmt::Debug for ResultScroller<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultScroller")
            .field("search_id", &self.search_id)
            .field("total_count", &self.total_count)
            .field("window", &self.window)
            .field("window_start", &self.window_start)
            .field("cursor", &self.cursor)
            .field("cached_len", &self.cached_len)
            .field("exhausted", &self.exhausted)
            .field("mode", &self.mode)
            .finish()
    }
}
