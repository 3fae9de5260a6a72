use clap::Parser;
use eyre::{Context, Result};
use log::{LevelFilter, info, warn};
use std::fs;
use std::path::PathBuf;

use langfuse_mcp::config::Config;
use langfuse_mcp::langfuse::LangfuseClient;
use langfuse_mcp::mcp::McpServer;
use langfuse_mcp::tools::{ToolCatalog, ToolRouter};

mod cli;

use cli::Cli;
use cli::commands::Commands;

/// Logging starts before the config is read so config warnings are kept.
/// Without `RUST_LOG` every record reaches the logger and `log::max_level`
/// is the gate, which lets the config level be applied afterwards.
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("langfuse-mcp")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("langfuse-mcp.log");

    // stdout carries the protocol, so logs go to a file
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let mut builder = env_logger::Builder::from_default_env();
    if !rust_log_set {
        builder.filter_level(LevelFilter::Trace);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    if !rust_log_set {
        log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info });
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Apply the config `log_level` unless `RUST_LOG` or `--verbose` already decided
fn apply_log_level(config: &Config, verbose: bool) {
    if verbose || std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Some(level) = config.log_level.as_deref() {
        match level.parse::<LevelFilter>() {
            Ok(filter) => log::set_max_level(filter),
            Err(_) => warn!("Ignoring unknown log_level '{}'", level),
        }
    }
}

fn print_tools() -> Result<()> {
    let tools = serde_json::to_string_pretty(ToolCatalog::builtin().all()).context("Failed to serialize tools")?;
    println!("{}", tools);
    Ok(())
}

async fn serve(config: &Config) -> Result<()> {
    if !config.langfuse.has_keys() {
        eprintln!("ERROR: set the LANGFUSE_PUBLIC_KEY and LANGFUSE_PRIVATE_KEY environment variables");
        std::process::exit(1);
    }

    let credentials = config.credentials().context("Invalid Langfuse configuration")?;
    info!("Using Langfuse at {}", credentials.domain());

    let client = LangfuseClient::new(&credentials, config.langfuse.timeout())
        .context("Failed to create Langfuse client")?;
    let server = McpServer::new(ToolRouter::new(client));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    server
        .serve(stdin, tokio::io::stdout())
        .await
        .context("Server failed")?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging before anything can log
    setup_logging(cli.is_verbose()).context("Failed to setup logging")?;

    // Load configuration, environment wins over the file
    let config = Config::load(cli.config.as_ref())
        .context("Failed to load configuration")?
        .apply_env();
    apply_log_level(&config, cli.is_verbose());

    info!("Starting with config from: {:?}", cli.config);

    match cli.subcommand() {
        Commands::Serve => serve(&config).await,
        Commands::Tools => print_tools(),
    }
}
