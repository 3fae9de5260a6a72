//! langfuse-mcp - Langfuse analytics exposed as MCP tools
//!
//! A stdio JSON-RPC server that advertises a fixed catalog of read-only tools
//! and maps each call onto the Langfuse public REST API.

pub mod config;
pub mod error;
pub mod langfuse;
pub mod mcp;
pub mod tools;

pub use error::{LangfuseError, Result};
