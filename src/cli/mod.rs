//! CLI module for langfuse-mcp - command-line interface and subcommands.
//!
//! With no subcommand the binary serves MCP over stdio.

pub mod commands;

pub use commands::Cli;
