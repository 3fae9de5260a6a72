//! Tool routing
//!
//! Resolves a tool name to the matching `LangfuseApi` method, decoding the
//! argument bag on the way in and wrapping the outcome on the way out.

use log::{info, warn};
use serde_json::Value;

use crate::error::{LangfuseError, Result};
use crate::langfuse::{LangfuseApi, decode_args};

use super::catalog::{
    GET_PROJECTS, GET_SESSION, GET_TRACE_BY_ID, LIST_ANNOTATION_QUEUES, LIST_SCORES, LIST_TRACES,
    QUERY_LLM_METRICS, ToolCatalog,
};
use super::definition::Tool;
use super::envelope::CallToolResult;

/// Dispatches tool calls to a Langfuse API implementation
pub struct ToolRouter<A> {
    api: A,
    catalog: &'static ToolCatalog,
}

impl<A: LangfuseApi> ToolRouter<A> {
    /// Create a router over the builtin catalog
    pub fn new(api: A) -> Self {
        Self {
            api,
            catalog: ToolCatalog::builtin(),
        }
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Every tool, in catalog order
    pub fn list_tools(&self) -> &[Tool] {
        self.catalog.all()
    }

    /// Run a tool. Always returns an envelope; failures are rendered inside it.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> CallToolResult {
        info!("Tool call: {}", name);
        match self.dispatch(name, arguments).await {
            Ok(value) => CallToolResult::from_value(&value),
            Err(e) => {
                if e.is_local() {
                    info!("Tool '{}' rejected: {}", name, e);
                } else {
                    warn!("Tool '{}' failed: {}", name, e);
                }
                CallToolResult::from_error(&e)
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: Option<Value>) -> Result<Value> {
        let arguments = arguments
            .filter(|args| !args.is_null())
            .ok_or_else(|| LangfuseError::Dispatch("No arguments provided".to_string()))?;

        match name {
            QUERY_LLM_METRICS => {
                let metrics = self.api.query_llm_metrics(decode_args(name, arguments)?).await?;
                Ok(serde_json::to_value(metrics)?)
            }
            GET_TRACE_BY_ID => self.api.get_trace_by_id(decode_args(name, arguments)?).await,
            LIST_TRACES => self.api.list_traces(decode_args(name, arguments)?).await,
            LIST_ANNOTATION_QUEUES => {
                self.api.list_annotation_queues(decode_args(name, arguments)?).await
            }
            LIST_SCORES => self.api.list_scores(decode_args(name, arguments)?).await,
            GET_SESSION => self.api.get_session(decode_args(name, arguments)?).await,
            GET_PROJECTS => self.api.get_projects().await,
            _ => Err(LangfuseError::Dispatch(format!("Unknown tool: {}", name))),
        }
    }
}
