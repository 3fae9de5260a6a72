//! Request construction for the Langfuse public API
//!
//! Every tool maps to exactly one GET. Building the request is pure so the
//! encoding rules can be checked without a server:
//!
//! - the daily metrics query always sends every parameter, substituting
//!   defaults and empty strings for anything missing
//! - the list endpoints send a parameter only when it has a value
//! - path identifiers are percent-encoded as a single segment

use reqwest::Url;

use super::args::{
    GetSessionArgs, GetTraceArgs, ListAnnotationQueuesArgs, ListScoresArgs, ListTracesArgs,
    QueryLlmMetricsArgs,
};
use super::timestamp::{INVALID_TIMESTAMP_MESSAGE, is_valid_timestamp};
use crate::error::{LangfuseError, Result};

pub const METRICS_DAILY_PATH: &str = "/api/public/metrics/daily";
pub const TRACES_PATH: &str = "/api/public/traces";
pub const ANNOTATION_QUEUES_PATH: &str = "/api/public/annotation-queues";
pub const SCORES_PATH: &str = "/api/public/scores";
pub const SESSIONS_PATH: &str = "/api/public/sessions";
pub const PROJECTS_PATH: &str = "/api/public/projects";

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 100;

/// A GET against the Langfuse API, relative to the configured domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Absolute path, already percent-encoded
    pub path: String,
    /// Query parameters in emission order
    pub query: Vec<(&'static str, String)>,
}

impl ApiRequest {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Always emit the parameter
    fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Emit a string parameter only when it is non-empty
    fn sparse(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.query.push((key, value.to_string()));
        }
        self
    }

    /// Emit a number only when it is non-zero
    fn sparse_number(mut self, key: &'static str, value: Option<u64>) -> Self {
        if let Some(value) = value.filter(|v| *v != 0) {
            self.query.push((key, value.to_string()));
        }
        self
    }

    /// Emit a list, comma-joined, only when it has elements
    fn sparse_list(mut self, key: &'static str, values: Option<&[String]>) -> Self {
        if let Some(values) = values.filter(|v| !v.is_empty()) {
            self.query.push((key, values.join(",")));
        }
        self
    }

    /// `GET /api/public/metrics/daily`
    pub fn metrics_daily(args: &QueryLlmMetricsArgs) -> Result<Self> {
        let from = args.from_timestamp.as_deref().unwrap_or_default();
        let to = args.to_timestamp.as_deref().unwrap_or_default();
        if !is_valid_timestamp(from) || !is_valid_timestamp(to) {
            return Err(LangfuseError::Validation(INVALID_TIMESTAMP_MESSAGE.to_string()));
        }

        let page = args.page.unwrap_or(DEFAULT_PAGE);
        let limit = args.limit.unwrap_or(DEFAULT_LIMIT);

        Ok(Self::new(METRICS_DAILY_PATH)
            .param("fromTimestamp", from)
            .param("toTimestamp", to)
            .param("page", page.to_string())
            .param("limit", limit.to_string())
            .param("traceName", args.trace_name.clone().unwrap_or_default())
            .param("userId", args.user_id.clone().unwrap_or_default())
            .param("tags", join_or_empty(args.tags.as_deref()))
            .param("environment", join_or_empty(args.environment.as_deref())))
    }

    /// `GET /api/public/traces/{traceId}`
    pub fn trace(args: &GetTraceArgs) -> Result<Self> {
        let id = required_id("traceId", args.trace_id.as_deref())?;
        Ok(Self::new(format!("{}/{}", TRACES_PATH, path_segment(id))))
    }

    /// `GET /api/public/traces`
    pub fn traces(args: &ListTracesArgs) -> Self {
        Self::new(TRACES_PATH)
            .sparse_number("page", args.page)
            .sparse_number("limit", args.limit)
            .sparse("userId", args.user_id.as_deref())
            .sparse("name", args.name.as_deref())
            .sparse("sessionId", args.session_id.as_deref())
            .sparse("fromTimestamp", args.from_timestamp.as_deref())
            .sparse("toTimestamp", args.to_timestamp.as_deref())
            .sparse_list("tags", args.tags.as_deref())
            .sparse_list("environment", args.environment.as_deref())
    }

    /// `GET /api/public/annotation-queues`
    pub fn annotation_queues(args: &ListAnnotationQueuesArgs) -> Self {
        Self::new(ANNOTATION_QUEUES_PATH)
            .sparse_number("page", args.page)
            .sparse_number("limit", args.limit)
    }

    /// `GET /api/public/scores`
    pub fn scores(args: &ListScoresArgs) -> Self {
        Self::new(SCORES_PATH)
            .sparse_number("page", args.page)
            .sparse_number("limit", args.limit)
            .sparse("name", args.name.as_deref())
            .sparse("userId", args.user_id.as_deref())
            .sparse_list("environment", args.environment.as_deref())
    }

    /// `GET /api/public/sessions/{sessionId}`
    pub fn session(args: &GetSessionArgs) -> Result<Self> {
        let id = required_id("sessionId", args.session_id.as_deref())?;
        Ok(Self::new(format!("{}/{}", SESSIONS_PATH, path_segment(id))))
    }

    /// `GET /api/public/projects`
    pub fn projects() -> Self {
        Self::new(PROJECTS_PATH)
    }

    /// Resolve against `domain`, form-encoding the query string
    pub fn url(&self, domain: &str) -> Result<Url> {
        let raw = format!("{}{}", domain.trim_end_matches('/'), self.path);
        let mut url = Url::parse(&raw)
            .map_err(|e| LangfuseError::Config(format!("Invalid Langfuse URL '{}': {}", raw, e)))?;
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

fn required_id<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LangfuseError::Validation(format!("{} is required", field)))
}

// Only RFC 3986 unreserved characters pass through, so `!'()*` are escaped as well
fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

fn join_or_empty(values: Option<&[String]>) -> String {
    values.map(|v| v.join(",")).unwrap_or_default()
}
