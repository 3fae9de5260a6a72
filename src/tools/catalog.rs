//! The fixed tool catalog
//!
//! Built once on first use and shared for the life of the process. Order is
//! part of the contract: discovery always returns the tools in this order.

use std::sync::LazyLock;

use serde_json::json;

use super::definition::{Tool, ToolParam};

pub const QUERY_LLM_METRICS: &str = "query_llm_metrics";
pub const GET_TRACE_BY_ID: &str = "get_trace_by_id";
pub const LIST_TRACES: &str = "list_traces";
pub const LIST_ANNOTATION_QUEUES: &str = "list_annotation_queues";
pub const LIST_SCORES: &str = "list_scores";
pub const GET_SESSION: &str = "get_session";
pub const GET_PROJECTS: &str = "get_projects";

static BUILTIN: LazyLock<ToolCatalog> = LazyLock::new(ToolCatalog::langfuse);

/// Ordered, immutable list of tools
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<Tool>,
}

impl ToolCatalog {
    /// The process-wide catalog
    pub fn builtin() -> &'static ToolCatalog {
        &BUILTIN
    }

    fn langfuse() -> Self {
        let page = || ToolParam::number("page").describe("Page number (default 1)");
        let limit = || ToolParam::number("limit").describe("Results per page limit");
        let user_id = || ToolParam::string("userId").describe("Filter by user ID");
        let environment = || ToolParam::string_list("environment").describe("Filter by environment");

        let tools = vec![
            Tool::new(QUERY_LLM_METRICS, "Query LLM metrics from Langfuse")
                .with_param(
                    ToolParam::string("fromTimestamp")
                        .describe("Start timestamp in ISO 8601 format")
                        .required(),
                )
                .with_param(
                    ToolParam::string("toTimestamp")
                        .describe("End timestamp in ISO 8601 format")
                        .required(),
                )
                .with_param(page().default_value(json!(1)))
                .with_param(
                    ToolParam::number("limit")
                        .describe("Results per page limit (default 100)")
                        .default_value(json!(100)),
                )
                .with_param(ToolParam::string("traceName").describe("Filter by trace name"))
                .with_param(user_id())
                .with_param(ToolParam::string_list("tags").describe("Filter by tags"))
                .with_param(environment()),
            Tool::new(GET_TRACE_BY_ID, "Get trace details by ID from Langfuse").with_param(
                ToolParam::string("traceId")
                    .describe("Langfuse trace identifier")
                    .required(),
            ),
            Tool::new(LIST_TRACES, "List traces from Langfuse with filtering options")
                .with_param(page())
                .with_param(limit())
                .with_param(user_id())
                .with_param(ToolParam::string("name").describe("Filter by trace name"))
                .with_param(ToolParam::string("sessionId").describe("Filter by session ID"))
                .with_param(
                    ToolParam::string("fromTimestamp")
                        .describe("Filter traces on or after this timestamp (ISO 8601)"),
                )
                .with_param(
                    ToolParam::string("toTimestamp")
                        .describe("Filter traces before this timestamp (ISO 8601)"),
                )
                .with_param(
                    ToolParam::string_list("tags").describe("Filter by tags (all tags must be present)"),
                )
                .with_param(environment()),
            Tool::new(LIST_ANNOTATION_QUEUES, "List annotation queues from Langfuse")
                .with_param(page())
                .with_param(limit()),
            Tool::new(LIST_SCORES, "List scores from Langfuse with filtering options")
                .with_param(page())
                .with_param(limit())
                .with_param(ToolParam::string("name").describe("Filter by score name"))
                .with_param(user_id())
                .with_param(environment()),
            Tool::new(GET_SESSION, "Get session details by ID from Langfuse").with_param(
                ToolParam::string("sessionId")
                    .describe("Langfuse session identifier")
                    .required(),
            ),
            Tool::new(
                GET_PROJECTS,
                "Get information about projects associated with the API key",
            ),
        ];

        Self { tools }
    }

    /// Get a tool by name
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Check if a tool exists
    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All tools, in catalog order
    pub fn all(&self) -> &[Tool] {
        &self.tools
    }

    /// Tool names, in catalog order
    #[cfg(test)]
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
