use crate::error::FetchError;
use async_trait::async_trait;
use model::pagination::range::ItemRange;
use tokio_util::sync::CancellationToken;

/// Reads one window of a search's results.
///
/// Implementations issue exactly one remote read per call and keep no state
/// between calls, so a single fetcher can serve any number of scrollers.
/// The returned records are in ascending result order and never exceed
/// `range.size()`; an empty vector means the range holds no records.
#[async_trait]
pub trait WindowFetcher<R>: Send + Sync {
    async fn fetch(
        &self,
        search_id: &str,
        range: ItemRange,
        cancel: &CancellationToken,
    ) -> Result<Vec<R>, FetchError>;
}
