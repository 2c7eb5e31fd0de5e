//! Zscaler MCP Server - Rust Implementation
//!
//! A Model Context Protocol (MCP) server for Zscaler Internet Access.
//! Provides tools for firewall services, URL categories, devices and Cloud App
//! Control via the ZIA API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zscaler_mcp_server_rust::config::{split_list, Config};
use zscaler_mcp_server_rust::launcher::{LaunchDescriptor, McpClientConfig};
use zscaler_mcp_server_rust::mcp::policy::ToolPolicy;
use zscaler_mcp_server_rust::mcp::server::{McpServer, SERVER_NAME};
use zscaler_mcp_server_rust::zia::auth::{AuthMode, Authenticator};
use zscaler_mcp_server_rust::zia::client::ZiaClient;

/// Zscaler MCP Server
#[derive(Parser)]
#[command(name = "zscaler-mcp-server")]
#[command(author, version, about = "Zscaler MCP Server - A Model Context Protocol server for Zscaler Internet Access")]
struct Cli {
    /// Env file with credentials (default: ~/.zscaler-mcp/.env)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Expose tools that create, modify or delete ZIA objects
    #[arg(long, global = true)]
    enable_write_tools: bool,

    /// Comma-separated write tool allowlist; `*` is a wildcard
    #[arg(long, global = true, value_name = "PATTERNS")]
    write_tools: Option<String>,

    /// Run destructive tools without asking for confirmation
    #[arg(long, global = true)]
    skip_confirmations: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the mcpServers entry for an MCP client, or merge it into a config file
    ClientConfig {
        /// Server name in the client config
        #[arg(long, default_value = SERVER_NAME)]
        name: String,

        /// Client config file to update instead of printing
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check configuration and credentials
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::new(cli.env_file.as_deref()).context("Failed to load configuration")?;
    if cli.enable_write_tools {
        config.write_enabled = true;
    }
    if let Some(patterns) = &cli.write_tools {
        config.write_tools = split_list(patterns);
    }
    if cli.skip_confirmations {
        config.skip_confirmations = true;
    }

    match cli.command {
        Some(Commands::ClientConfig { name, output }) => client_config(&config, &name, output),
        Some(Commands::Doctor) => doctor(config).await,
        None => run_server(config).await,
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    if !config.has_oneapi() && !config.has_legacy() {
        tracing::warn!("No ZIA credentials configured; tool calls will fail until they are set");
    }
    if config.write_enabled {
        tracing::info!(
            "Write tools enabled (allowlist: {})",
            if config.write_tools.is_empty() {
                "all".to_string()
            } else {
                config.write_tools.join(", ")
            }
        );
    }

    let policy = ToolPolicy::from_config(&config);
    let authenticator = Arc::new(Authenticator::new(config)?);
    let zia_client = Arc::new(ZiaClient::new(authenticator)?);

    let mut server = McpServer::new(zia_client, policy);
    server.run_stdio().await.context("MCP server failed")?;

    Ok(())
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn client_config(config: &Config, name: &str, output: Option<PathBuf>) -> anyhow::Result<()> {
    let executable = std::env::current_exe().context("Failed to locate the server executable")?;
    let descriptor = LaunchDescriptor::for_executable(&executable, config.env_file.as_deref());

    match output {
        Some(path) => {
            McpClientConfig::merge_into_file(&path, name, &descriptor)
                .with_context(|| format!("Failed to update {}", path.display()))?;
            eprintln!("Added '{}' to {}", name, path.display());
        }
        None => println!("{}", McpClientConfig::single(name, &descriptor)?.to_json()?),
    }

    Ok(())
}

async fn doctor(config: Config) -> anyhow::Result<()> {
    println!("{} {}", SERVER_NAME, env!("CARGO_PKG_VERSION"));
    println!("Platform:        {} ({})", std::env::consts::OS, std::env::consts::ARCH);
    println!(
        "Env file:        {}",
        config
            .env_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!("OneAPI creds:    {}", present(config.has_oneapi()));
    println!("Legacy creds:    {}", present(config.has_legacy()));
    println!("Default mode:    {}", if config.use_legacy { AuthMode::Legacy } else { AuthMode::OneApi });
    println!("OneAPI base URL: {}", config.api_base_url);
    if let Some(url) = &config.token_url {
        println!("Token URL:       {}", url);
    }
    if let Some(url) = &config.legacy_base_url {
        println!("Legacy base URL: {}", url);
    }
    println!("Write tools:     {}", if config.write_enabled { "enabled" } else { "disabled" });
    if !config.write_tools.is_empty() {
        println!("Allowlist:       {}", config.write_tools.join(", "));
    }
    println!("Confirmations:   {}", if config.skip_confirmations { "skipped" } else { "required" });

    let has_oneapi = config.has_oneapi();
    let has_legacy = config.has_legacy();
    let authenticator = Authenticator::new(config)?;
    let mut failed = false;

    if has_oneapi {
        match authenticator.access_token().await {
            Ok(_) => println!("OneAPI auth:     ok"),
            Err(e) => {
                failed = true;
                println!("OneAPI auth:     FAILED ({})", e);
            }
        }
    }
    if has_legacy {
        match authenticator.session_cookie().await {
            Ok(_) => println!("Legacy auth:     ok"),
            Err(e) => {
                failed = true;
                println!("Legacy auth:     FAILED ({})", e);
            }
        }
    }

    if !has_oneapi && !has_legacy {
        anyhow::bail!("no ZIA credentials configured");
    }
    if failed {
        anyhow::bail!("authentication check failed");
    }
    Ok(())
}

fn present(configured: bool) -> &'static str {
    if configured {
        "configured"
    } else {
        "missing"
    }
}
