//! CLI command definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// langfuse-mcp - Langfuse analytics as MCP tools over stdio
#[derive(Parser, Debug)]
#[command(name = "langfuse-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Subcommand to run, `serve` when none was given
    pub fn subcommand(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Serve,

    /// Print the tool catalog as JSON and exit
    Tools,
}
