use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::RANGE},
    response::{IntoResponse, Response},
    routing::get,
};
use model::pagination::range::ItemRange;
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{net::TcpListener, task::JoinHandle};

/// How a fake search behaves.
#[derive(Debug, Clone)]
pub struct SearchFixture {
    pub records: usize,
    pub status: &'static str,
    /// Windows starting at or past this index answer 500.
    pub fail_from: Option<usize>,
    /// Windows starting at or past this index answer a non-JSON body.
    pub garbage_from: Option<usize>,
    /// Extra records appended past the requested range.
    pub overshoot: usize,
    /// Windows starting at or past `.0` are delayed by `.1`.
    pub delay: Option<(usize, Duration)>,
}

impl SearchFixture {
    pub fn completed(records: usize) -> Self {
        SearchFixture {
            records,
            status: "COMPLETED",
            fail_from: None,
            garbage_from: None,
            overshoot: 0,
            delay: None,
        }
    }

    pub fn failing_from(mut self, start: usize) -> Self {
        self.fail_from = Some(start);
        self
    }

    pub fn garbage_from(mut self, start: usize) -> Self {
        self.garbage_from = Some(start);
        self
    }

    pub fn overshooting(mut self, extra: usize) -> Self {
        self.overshoot = extra;
        self
    }

    pub fn delayed_from(mut self, start: usize, delay: Duration) -> Self {
        self.delay = Some((start, delay));
        self
    }
}

/// A results request as seen by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub search_id: String,
    pub range: Option<String>,
    pub sec: Option<String>,
    pub version: Option<String>,
    pub returned: usize,
}

#[derive(Default)]
struct ServerState {
    searches: HashMap<String, SearchFixture>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct TestServer {
    pub base_url: String,
    state: Arc<ServerState>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn<I>(searches: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, SearchFixture)>,
    {
        let state = Arc::new(ServerState {
            searches: searches
                .into_iter()
                .map(|(id, fixture)| (id.to_string(), fixture))
                .collect(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/ariel/searches/{id}", get(search_status))
            .route("/api/ariel/searches/{id}/results", get(search_results))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });

        TestServer {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    /// Results requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn ranges(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.range.unwrap_or_default())
            .collect()
    }

    pub fn returned_sizes(&self) -> Vec<usize> {
        self.requests().into_iter().map(|r| r.returned).collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "http_response": { "code": 404, "message": "Not Found" },
            "message": format!("Search {id} does not exist"),
        })),
    )
        .into_response()
}

async fn search_status(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Response {
    match state.searches.get(&id) {
        Some(fixture) => Json(json!({
            "search_id": id,
            "status": fixture.status,
            "record_count": fixture.records,
            "progress": 100,
        }))
        .into_response(),
        None => not_found(&id),
    }
}

async fn search_results(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Some(fixture) = state.searches.get(&id).cloned() else {
        return not_found(&id);
    };

    let raw_range = header(&headers, RANGE.as_str());
    let mut recorded = RecordedRequest {
        search_id: id.clone(),
        range: raw_range.clone(),
        sec: header(&headers, "SEC"),
        version: header(&headers, "Version"),
        returned: 0,
    };

    let range = match raw_range.as_deref().map(str::parse::<ItemRange>) {
        Some(Ok(range)) => range,
        _ => {
            state.requests.lock().expect("requests lock").push(recorded);
            return StatusCode::RANGE_NOT_SATISFIABLE.into_response();
        }
    };

    if let Some((from, delay)) = fixture.delay
        && range.start >= from
    {
        tokio::time::sleep(delay).await;
    }

    let response = if fixture.fail_from.is_some_and(|from| range.start >= from) {
        (StatusCode::INTERNAL_SERVER_ERROR, "search results unavailable").into_response()
    } else if fixture.garbage_from.is_some_and(|from| range.start >= from) {
        (StatusCode::OK, "<html>not json</html>").into_response()
    } else {
        let end = (range.end + fixture.overshoot).min(fixture.records);
        let events: Vec<Value> = (range.start..end)
            .map(|seq| json!({ "seq": seq, "sourceip": format!("10.0.{}.{}", seq / 256, seq % 256) }))
            .collect();
        recorded.returned = events.len();
        Json(json!({ "events": events })).into_response()
    };

    state.requests.lock().expect("requests lock").push(recorded);
    response
}
