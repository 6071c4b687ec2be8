use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use wp_mcp::{McpServer, Settings, ToolRegistry, WpClient};

#[derive(Parser, Debug)]
#[command(name = "wp-mcp", version, about = "WordPress REST API as MCP tools over stdio")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Write a commented sample configuration file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        return Settings::generate_sample_config();
    }

    let settings = Settings::load(cli.config.as_deref())?;

    // Stdout carries the protocol; logs go to stderr.
    let default_level = settings
        .server
        .log_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = Arc::new(WpClient::new(&settings.wordpress)?);

    let mut registry = ToolRegistry::new();
    wp_mcp::tools::register_all(&mut registry, client).context("tool registration failed")?;

    let server = McpServer::new(registry);
    server.run_stdio().await?;
    Ok(())
}
