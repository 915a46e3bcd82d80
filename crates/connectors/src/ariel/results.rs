use crate::{ariel::client::ArielClient, error::FetchError, fetcher::WindowFetcher};
use async_trait::async_trait;
use model::{pagination::range::ItemRange, records::page::WindowPage};
use reqwest::{RequestBuilder, header::RANGE};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Fetches result windows over HTTP using `Range: items=<start>-<end>` requests.
#[derive(Debug, Clone)]
pub struct HttpWindowFetcher {
    client: ArielClient,
}

impl HttpWindowFetcher {
    pub fn new(client: ArielClient) -> Self {
        HttpWindowFetcher { client }
    }

    pub fn client(&self) -> &ArielClient {
        &self.client
    }

    pub fn request(&self, search_id: &str, range: ItemRange) -> RequestBuilder {
        self.client
            .get(&format!("searches/{search_id}/results"))
            .header(RANGE, range.header_value())
    }
}

#[async_trait]
impl<R> WindowFetcher<R> for HttpWindowFetcher
where
    R: DeserializeOwned + Send + 'static,
{
    async fn fetch(
        &self,
        search_id: &str,
        range: ItemRange,
        cancel: &CancellationToken,
    ) -> Result<Vec<R>, FetchError> {
        let range = ItemRange::new(range.start, range.end)?;
        let body = self
            .client
            .execute(self.request(search_id, range), search_id, cancel)
            .await?;

        let page: WindowPage<R> = serde_json::from_slice(&body)?;
        let mut events = page.into_events();

        if events.len() > range.size() {
            warn!(
                "Search {} returned {} records for {} (requested {}); dropping the excess",
                search_id,
                events.len(),
                range,
                range.size()
            );
            events.truncate(range.size());
        }

        debug!(
            "Fetched {} records for search {} in {}",
            events.len(),
            search_id,
            range
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ariel::client::ClientConfig;

    #[test]
    fn test_request_carries_range_header() {
        let client = ArielClient::new(ClientConfig::new("http://localhost:8080")).unwrap();
        let fetcher = HttpWindowFetcher::new(client);

        let range = ItemRange::window(50, 50).unwrap();
        let request = fetcher.request("abc-123", range).build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/ariel/searches/abc-123/results"
        );
        assert_eq!(request.headers().get(RANGE).unwrap(), "items=50-100");
        assert!(request.headers().get("SEC").is_none());
    }
}
