#[cfg(test)]
mod tests {
    use crate::{
        TEST_TOKEN, client_for,
        server::{SearchFixture, TestServer},
    };
    use connectors::{
        ariel::results::HttpWindowFetcher, error::FetchError, fetcher::WindowFetcher,
    };
    use model::{pagination::range::ItemRange, records::event::Event, search::status::SearchStatus};
    use tokio_util::sync::CancellationToken;
    use tracing_test::traced_test;

    fn seqs(events: &[Event]) -> Vec<u64> {
        events
            .iter()
            .map(|e| e.get("seq").and_then(|v| v.as_u64()).expect("seq field"))
            .collect()
    }

    #[tokio::test]
    async fn test_window_request_headers() {
        let server = TestServer::spawn([("s1", SearchFixture::completed(80))]).await;
        let fetcher = HttpWindowFetcher::new(client_for(&server.base_url));

        let events: Vec<Event> = fetcher
            .fetch("s1", ItemRange::window(50, 50).unwrap(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(seqs(&events), (50..80).collect::<Vec<_>>());

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].search_id, "s1");
        assert_eq!(requests[0].range.as_deref(), Some("items=50-100"));
        assert_eq!(requests[0].sec.as_deref(), Some(TEST_TOKEN));
        assert_eq!(requests[0].version.as_deref(), Some("12.0"));
    }

    #[tokio::test]
    async fn test_window_past_end_is_empty() {
        let server = TestServer::spawn([("s1", SearchFixture::completed(100))]).await;
        let fetcher = HttpWindowFetcher::new(client_for(&server.base_url));

        let events: Vec<Event> = fetcher
            .fetch("s1", ItemRange::window(100, 50).unwrap(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(events.is_empty());
    }

    #[traced_test]
    #[tokio::test]
    async fn test_oversized_window_is_truncated() {
        let server =
            TestServer::spawn([("s1", SearchFixture::completed(200).overshooting(7))]).await;
        let fetcher = HttpWindowFetcher::new(client_for(&server.base_url));

        let events: Vec<Event> = fetcher
            .fetch("s1", ItemRange::window(0, 50).unwrap(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(seqs(&events), (0..50).collect::<Vec<_>>());
        assert_eq!(server.returned_sizes(), vec![57]);
        assert!(logs_contain("dropping the excess"));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server =
            TestServer::spawn([("s1", SearchFixture::completed(100).failing_from(0))]).await;
        let fetcher = HttpWindowFetcher::new(client_for(&server.base_url));

        let err = WindowFetcher::<Event>::fetch(
            &fetcher,
            "s1",
            ItemRange::window(0, 50).unwrap(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        match err {
            FetchError::Status {
                search_id,
                status,
                body,
            } => {
                assert_eq!(search_id, "s1");
                assert_eq!(status.as_u16(), 500);
                assert!(body.contains("unavailable"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server =
            TestServer::spawn([("s1", SearchFixture::completed(100).garbage_from(0))]).await;
        let fetcher = HttpWindowFetcher::new(client_for(&server.base_url));

        let err = WindowFetcher::<Event>::fetch(
            &fetcher,
            "s1",
            ItemRange::window(0, 50).unwrap(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_search_status_lookup() {
        let server = TestServer::spawn([("s1", SearchFixture::completed(321))]).await;
        let client = client_for(&server.base_url);

        let info = client
            .search_status("s1", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(info.search_id, "s1");
        assert_eq!(info.status, SearchStatus::Completed);
        assert_eq!(info.record_count, 321);
    }

    #[tokio::test]
    async fn test_unknown_search_status_is_404() {
        let server = TestServer::spawn([("s1", SearchFixture::completed(1))]).await;
        let client = client_for(&server.base_url);

        let err = client
            .search_status("missing", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Bind and drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpWindowFetcher::new(client_for(&format!("http://{addr}")));
        let err = WindowFetcher::<Event>::fetch(
            &fetcher,
            "s1",
            ItemRange::window(0, 50).unwrap(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
    }
}
