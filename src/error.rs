//! Error types for langfuse-mcp
//!
//! Centralized error handling using thiserror. Every variant except `Config`
//! is recoverable at the tool boundary and rendered into a result envelope.

use thiserror::Error;

/// All error types that can occur while serving tool calls
#[derive(Debug, Error)]
pub enum LangfuseError {
    /// Missing or malformed startup configuration (fatal)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Arguments rejected before any request was issued
    #[error("{0}")]
    Validation(String),

    /// Non-success HTTP status from the Langfuse API
    #[error("Langfuse API error ({status}): {body}")]
    Remote { status: u16, body: String },

    /// Response body was not the JSON we expected
    #[error("Failed to parse Langfuse API response: {0}")]
    Parse(String),

    /// Tool call could not be routed
    #[error("{0}")]
    Dispatch(String),

    /// Request could not be sent or the response body could not be read
    #[error("Request to Langfuse failed: {0}")]
    Transport(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error on the protocol side
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LangfuseError {
    /// True when the error was raised locally, before any network traffic
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Dispatch(_) | Self::Config(_))
    }
}

/// Result type alias for langfuse-mcp operations
pub type Result<T> = std::result::Result<T, LangfuseError>;
