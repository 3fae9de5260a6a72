//! Langfuse API client
//!
//! `LangfuseApi` is the seam between tool dispatch and the network: one method
//! per tool, each issuing exactly one GET. `LangfuseClient` is the reqwest
//! implementation.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::args::{
    GetSessionArgs, GetTraceArgs, ListAnnotationQueuesArgs, ListScoresArgs, ListTracesArgs,
    QueryLlmMetricsArgs,
};
use super::credentials::Credentials;
use super::request::ApiRequest;
use super::types::MetricsResponse;
use crate::error::{LangfuseError, Result};

/// Read-only operations exposed as tools
#[async_trait]
pub trait LangfuseApi: Send + Sync {
    /// Daily LLM metrics for a time range
    async fn query_llm_metrics(&self, args: QueryLlmMetricsArgs) -> Result<MetricsResponse>;

    /// A single trace by id
    async fn get_trace_by_id(&self, args: GetTraceArgs) -> Result<Value>;

    /// Filtered, paginated traces
    async fn list_traces(&self, args: ListTracesArgs) -> Result<Value>;

    /// Paginated annotation queues
    async fn list_annotation_queues(&self, args: ListAnnotationQueuesArgs) -> Result<Value>;

    /// Filtered, paginated scores
    async fn list_scores(&self, args: ListScoresArgs) -> Result<Value>;

    /// A single session by id
    async fn get_session(&self, args: GetSessionArgs) -> Result<Value>;

    /// Projects visible to the key pair
    async fn get_projects(&self) -> Result<Value>;
}

/// HTTP client for the Langfuse public API
pub struct LangfuseClient {
    http: Client,
    domain: String,
    auth_header: String,
}

impl LangfuseClient {
    /// Create a client. `timeout` of `None` keeps reqwest's default (no timeout).
    pub fn new(credentials: &Credentials, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| LangfuseError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_http_client(credentials, http))
    }

    /// Create a client around an existing reqwest client
    pub fn with_http_client(credentials: &Credentials, http: Client) -> Self {
        Self {
            http,
            domain: credentials.domain().to_string(),
            auth_header: credentials.basic_auth_header(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Issue the GET and decode the body
    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let url = request.url(&self.domain)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| LangfuseError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LangfuseError::Transport(format!("Failed to read response body: {}", e)))?;

        debug!("Langfuse responded {} ({} bytes)", status, body.len());
        decode_response(status, &body)
    }
}

/// Map a raw HTTP response onto the error taxonomy
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(LangfuseError::Remote {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    serde_json::from_str(body).map_err(|e| LangfuseError::Parse(e.to_string()))
}

#[async_trait]
impl LangfuseApi for LangfuseClient {
    async fn query_llm_metrics(&self, args: QueryLlmMetricsArgs) -> Result<MetricsResponse> {
        self.fetch(ApiRequest::metrics_daily(&args)?).await
    }

    async fn get_trace_by_id(&self, args: GetTraceArgs) -> Result<Value> {
        self.fetch(ApiRequest::trace(&args)?).await
    }

    async fn list_traces(&self, args: ListTracesArgs) -> Result<Value> {
        self.fetch(ApiRequest::traces(&args)).await
    }

    async fn list_annotation_queues(&self, args: ListAnnotationQueuesArgs) -> Result<Value> {
        self.fetch(ApiRequest::annotation_queues(&args)).await
    }

    async fn list_scores(&self, args: ListScoresArgs) -> Result<Value> {
        self.fetch(ApiRequest::scores(&args)).await
    }

    async fn get_session(&self, args: GetSessionArgs) -> Result<Value> {
        self.fetch(ApiRequest::session(&args)?).await
    }

    async fn get_projects(&self) -> Result<Value> {
        self.fetch(ApiRequest::projects()).await
    }
}

impl std::fmt::Debug for LangfuseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LangfuseClient")
            .field("domain", &self.domain)
            .finish()
    }
}
