#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use tokio::net::TcpListener;
use tokio::time::{Duration, sleep};

#[derive(Debug, Clone, Deserialize)]
pub struct RecordedListRequest {
    pub limit: u32,
    pub offset: u64,
}

#[derive(Clone)]
struct MockState {
    total: u64,
    list_requests: Arc<Mutex<Vec<RecordedListRequest>>>,
    auth_headers: Arc<Mutex<Vec<Option<String>>>>,
    report_failures_left: Arc<AtomicU32>,
}

/// Spaceflight-News-shaped API served from memory on a random port.
pub struct MockNewsServer {
    pub base_url: String,
    list_requests: Arc<Mutex<Vec<RecordedListRequest>>>,
    auth_headers: Arc<Mutex<Vec<Option<String>>>>,
    _server_handle: tokio::task::JoinHandle<()>,
}

pub fn item_json(id: u64) -> JsonValue {
    json!({
        "id": id,
        "title": format!("Mock item {id}"),
        "authors": [{"name": "Mock Author", "socials": {"x": "https://x.com/mock"}}],
        "url": format!("https://news.example.com/{id}"),
        "image_url": format!("https://news.example.com/{id}.jpg"),
        "news_site": "Mock Site",
        "summary": "A mock summary.",
        "published_at": "2024-03-01T12:00:00Z",
        "updated_at": "2024-03-01T12:00:00Z",
        "featured": id == 1,
        "launches": [],
        "events": []
    })
}

impl MockNewsServer {
    /// Start a server holding `total` items per resource. The first
    /// `report_failures` calls to the report list answer 503.
    pub async fn start(total: u64, report_failures: u32) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let list_requests = Arc::new(Mutex::new(Vec::new()));
        let auth_headers = Arc::new(Mutex::new(Vec::new()));

        let state = MockState {
            total,
            list_requests: list_requests.clone(),
            auth_headers: auth_headers.clone(),
            report_failures_left: Arc::new(AtomicU32::new(report_failures)),
        };

        let app = Router::new()
            .route("/v4/articles/", get(list_articles))
            .route("/v4/blogs/", get(list_articles))
            .route("/v4/reports/", get(list_reports))
            .route("/v4/articles/:id/", get(get_item))
            .route("/v4/blogs/:id/", get(get_item))
            .route("/v4/reports/:id/", get(get_item))
            .route("/v4/unauthorized/", get(unauthorized))
            .route("/v4/broken/", get(broken))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        sleep(Duration::from_millis(50)).await;

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}/v4", port),
            list_requests,
            auth_headers,
            _server_handle: server_handle,
        })
    }

    pub fn list_requests(&self) -> Vec<RecordedListRequest> {
        self.list_requests.lock().unwrap().clone()
    }

    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.auth_headers.lock().unwrap().clone()
    }
}

fn record_auth(state: &MockState, headers: &HeaderMap) {
    let value = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.auth_headers.lock().unwrap().push(value);
}

fn page_json(state: &MockState, request: &RecordedListRequest) -> JsonValue {
    let start = request.offset.min(state.total);
    let end = (start + u64::from(request.limit)).min(state.total);
    let results: Vec<JsonValue> = (start..end).map(|i| item_json(i + 1)).collect();
    let next = (end < state.total).then(|| {
        format!("http://mock/v4/articles/?limit={}&offset={}", request.limit, end)
    });
    json!({
        "count": state.total,
        "next": next,
        "previous": null,
        "results": results
    })
}

async fn list_articles(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(request): Query<RecordedListRequest>,
) -> Json<JsonValue> {
    record_auth(&state, &headers);
    state.list_requests.lock().unwrap().push(request.clone());
    Json(page_json(&state, &request))
}

async fn list_reports(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(request): Query<RecordedListRequest>,
) -> (StatusCode, Json<JsonValue>) {
    record_auth(&state, &headers);
    state.list_requests.lock().unwrap().push(request.clone());

    let failures_left = state.report_failures_left.load(Ordering::SeqCst);
    if failures_left > 0 {
        state
            .report_failures_left
            .store(failures_left - 1, Ordering::SeqCst);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"message": "Service temporarily unavailable"})),
        );
    }
    (StatusCode::OK, Json(page_json(&state, &request)))
}

async fn get_item(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> (StatusCode, Json<JsonValue>) {
    record_auth(&state, &headers);
    if id == 0 || id > state.total {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "No Article matches the given query."})),
        );
    }
    (StatusCode::OK, Json(item_json(id)))
}

async fn unauthorized() -> StatusCode {
    StatusCode::UNAUTHORIZED
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}
