use crate::error::FetchError;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, HeaderValue},
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const API_PREFIX: &str = "api/ariel";
const SEC_HEADER: &str = "SEC";
const VERSION_HEADER: &str = "Version";
const MAX_ERROR_BODY: usize = 512;

/// Connection parameters for the search API.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub sec_token: Option<String>,
    pub api_version: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            sec_token: None,
            api_version: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("has_token", &self.sec_token.is_some())
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Thin HTTP client for the Ariel search endpoints.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ArielClient {
    http: Client,
    base_url: String,
    sec_token: Option<String>,
    api_version: Option<String>,
}

impl std::fmt::Debug for ArielClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArielClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.sec_token.is_some())
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl ArielClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        info!("Creating search API client for {}", config.base_url);

        Ok(ArielClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sec_token: config.sec_token,
            api_version: config.api_version,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint below the search API prefix.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{API_PREFIX}/{}",
            self.base_url,
            path.trim_start_matches('/')
        )
    }

    /// GET request carrying the authentication and version headers.
    pub fn get(&self, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .get(self.endpoint(path))
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.sec_token {
            builder = builder.header(SEC_HEADER, token);
        }
        if let Some(version) = &self.api_version {
            builder = builder.header(VERSION_HEADER, version);
        }

        builder
    }

    /// Sends the request and returns the raw body of a successful response.
    ///
    /// Resolves to [`FetchError::Cancelled`] as soon as `cancel` fires, even
    /// while the request is in flight.
    pub async fn execute(
        &self,
        request: RequestBuilder,
        search_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, FetchError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            res = Self::read_body(request, search_id) => res,
        }
    }

    async fn read_body(request: RequestBuilder, search_id: &str) -> Result<Vec<u8>, FetchError> {
        let response = request.send().await?;
        let response = Self::check_status(response, search_id).await?;
        let body = response.bytes().await?;

        debug!("Read {} bytes for search {}", body.len(), search_id);
        Ok(body.to_vec())
    }

    async fn check_status(response: Response, search_id: &str) -> Result<Response, FetchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| body.is_char_boundary(*i))
                .unwrap_or(0);
            body.truncate(cut);
        }

        Err(FetchError::Status {
            search_id: search_id.to_string(),
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ArielClient {
        let mut config = ClientConfig::new("https://siem.example.com/");
        config.sec_token = Some("secret".into());
        config.api_version = Some("12.0".into());
        ArielClient::new(config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_prefix() {
        let client = client();
        assert_eq!(client.base_url(), "https://siem.example.com");
        assert_eq!(
            client.endpoint("/searches/abc"),
            "https://siem.example.com/api/ariel/searches/abc"
        );
    }

    #[test]
    fn test_get_sets_headers() {
        let request = client().get("searches/abc").build().unwrap();
        let headers = request.headers();

        assert_eq!(headers.get("SEC").unwrap(), "secret");
        assert_eq!(headers.get("Version").unwrap(), "12.0");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_debug_hides_token() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("has_token: true"));
    }

    #[tokio::test]
    async fn test_execute_cancelled_before_send() {
        let client = client();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client
            .execute(client.get("searches/abc"), "abc", &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
