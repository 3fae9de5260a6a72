//! Tool System - tool definitions, the fixed catalog, result envelopes and routing

mod catalog;
mod definition;
mod envelope;
mod router;

pub use catalog::{
    GET_PROJECTS, GET_SESSION, GET_TRACE_BY_ID, LIST_ANNOTATION_QUEUES, LIST_SCORES, LIST_TRACES,
    QUERY_LLM_METRICS, ToolCatalog,
};
pub use definition::{ParamType, Tool, ToolParam};
pub use envelope::{CallToolResult, ContentBlock};
pub use router::ToolRouter;
