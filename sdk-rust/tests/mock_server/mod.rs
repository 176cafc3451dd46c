#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use serde_json::Value;
use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

/// A request seen by [`MockServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

struct MockServerState {
    hits: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
    status: StatusCode,
    body: String,
    delay: Duration,
}

/// A local HTTP server that answers every request with a fixed status and
/// body, counting hits.
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockServerState>,
}

impl MockServer {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Like [`MockServer::start`], but each response is held back for `delay`
    /// after the request is recorded.
    pub async fn start_with_delay(
        status: StatusCode,
        body: impl Into<String>,
        delay: Duration,
    ) -> Self {
        let state = Arc::new(MockServerState {
            hits: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            status,
            body: body.into(),
            delay,
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock server");
        });

        Self { addr, state }
    }

    pub fn base_url(&self, prefix: &str) -> String {
        format!("http://{}{prefix}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests poisoned").clone()
    }
}

async fn handle(
    State(state): State<Arc<MockServerState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state
        .requests
        .lock()
        .expect("requests poisoned")
        .push(RecordedRequest {
            path: uri.path().to_string(),
            headers,
            body: serde_json::from_str(&body).unwrap_or(Value::Null),
        });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// An address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}
