//! Shared helpers for integration tests
//!
//! `StubServer` is an axum app on localhost that answers every request with a
//! fixed status and body, recording what it received.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::IntoResponse;
use langfuse_mcp::langfuse::{Credentials, LangfuseClient};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const PUBLIC_KEY: &str = "pk-lf-test";
pub const PRIVATE_KEY: &str = "sk-lf-test";

/// A request as seen by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path plus query, exactly as sent
    pub target: String,
    pub headers: HeaderMap,
}

impl RecordedRequest {
    pub fn method(&self) -> &str {
        self.method.as_str()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, q)| q)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn handle_any(
    State(state): State<StubState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> impl IntoResponse {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        target,
        headers,
    });
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// Handle for the stub Langfuse API
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Answer every request with `status` and `body`
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = StubState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(handle_any).with_state(state);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request this test expects
    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {:?}", requests);
        requests.into_iter().next().unwrap()
    }

    /// Client pointed at this stub with the test key pair
    pub fn client(&self) -> LangfuseClient {
        let credentials = Credentials::new(self.base_url(), PUBLIC_KEY, PRIVATE_KEY).unwrap();
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        LangfuseClient::with_http_client(&credentials, http)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
