//! Langfuse API layer - request construction, transport and response decoding
//!
//! This module provides:
//! - Typed argument records for each tool
//! - Pure request builders with the per-endpoint encoding rules
//! - The LangfuseApi trait and its reqwest-backed LangfuseClient

pub mod args;
pub mod client;
pub mod credentials;
pub mod request;
pub mod timestamp;
pub mod types;

pub use args::{
    GetSessionArgs, GetTraceArgs, ListAnnotationQueuesArgs, ListScoresArgs, ListTracesArgs,
    QueryLlmMetricsArgs, decode_args,
};
pub use client::{LangfuseApi, LangfuseClient, decode_response};
pub use credentials::{Credentials, DEFAULT_DOMAIN};
pub use request::ApiRequest;
pub use timestamp::is_valid_timestamp;
pub use types::{DailyMetric, MetricsResponse};
