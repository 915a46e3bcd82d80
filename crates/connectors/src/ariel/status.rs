use crate::{ariel::client::ArielClient, error::FetchError};
use model::search::status::SearchInfo;
use tokio_util::sync::CancellationToken;
use tracing::debug;

impl ArielClient {
    /// Looks up the current state and record count of a submitted search.
    ///
    /// This is a single read; it does not wait for the search to complete.
    pub async fn search_status(
        &self,
        search_id: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchInfo, FetchError> {
        let request = self.get(&format!("searches/{search_id}"));
        let body = self.execute(request, search_id, cancel).await?;
        let info: SearchInfo = serde_json::from_slice(&body)?;

        debug!(
            "Search {} is {} with {} records",
            info.search_id, info.status, info.record_count
        );
        Ok(info)
    }
}
