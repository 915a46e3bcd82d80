use super::ResultScroller;
use crate::{error::ScrollError, settings::ScrollSettings};
use connectors::ariel::{client::ArielClient, results::HttpWindowFetcher};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

impl<R> ResultScroller<R>
where
    R: DeserializeOwned + Send + 'static,
{
    /// Opens a scroller over a search's results using only its identifier.
    ///
    /// The record count comes from one status lookup. The search is not
    /// waited on; if it is still running the count is a lower bound.
    pub async fn for_search(
        client: &ArielClient,
        search_id: &str,
        settings: ScrollSettings,
        cancel: &CancellationToken,
    ) -> Result<Self, ScrollError> {
        let info = client
            .search_status(search_id, cancel)
            .await
            .map_err(|source| ScrollError::Status {
                search_id: search_id.to_string(),
                source,
            })?;

        if info.status.is_terminal() {
            info!(
                "Search {} is {} with {} records",
                search_id, info.status, info.record_count
            );
        } else {
            warn!(
                "Search {} is still {}; {} records reported so far",
                search_id, info.status, info.record_count
            );
        }

        let fetcher = Arc::new(HttpWindowFetcher::new(client.clone()));
        Self::open(fetcher, search_id, info.record_count, settings, cancel).await
    }
}
