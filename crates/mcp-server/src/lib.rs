//! CloudMCP: a Linode control plane exposed over the Model Context Protocol.
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "cloudmcp": {
//!       "command": "cloudmcp",
//!       "env": { "LINODE_TOKEN": "..." }
//!     }
//!   }
//! }
//! ```
//!
//! Accounts live in `~/.config/cloudmcp/config.toml` (see `cloudmcp-config`); every tool runs
//! against the current account, which `linode_account_switch` changes.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use cloudmcp_config::Config;
use cloudmcp_linode::transport;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

pub mod accounts;
pub mod reference_cache;
pub mod tools;
pub mod version;

pub use accounts::{Account, AccountError, AccountRegistry, AccountSummary};
pub use reference_cache::{ReferenceCache, ReferenceSource};
pub use tools::CloudMcpService;

#[derive(Debug, Parser)]
#[command(name = "cloudmcp", version, about = "Linode MCP server with multi-account support")]
pub struct Cli {
    /// Configuration file (default: $CLOUDMCP_CONFIG or <config dir>/cloudmcp/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// HTTP transport profile (default, high-throughput, low-latency, resource-constrained,
    /// batch-processing)
    #[arg(long, value_name = "NAME")]
    pub transport_profile: Option<String>,

    /// Load the configuration, verify every account, print a summary and exit
    #[arg(long)]
    pub check: bool,
}

pub async fn main_entry() -> Result<()> {
    run(Cli::parse()).await
}

fn init_logging(level: Option<&str>) {
    // stdout carries the MCP protocol; everything else goes to stderr.
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.unwrap_or("warn")),
    )
    .target(env_logger::Target::Stderr)
    .try_init();
}

pub async fn run(cli: Cli) -> Result<()> {
    let path = cloudmcp_config::resolve_path(cli.config.as_deref())?;
    let document = Config::load(&path)?;
    let mut config = document.clone();
    config.apply_env()?;

    init_logging(
        cli.log_level
            .as_deref()
            .or(config.system.log_level.as_deref()),
    );
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    let mut section = config.transport.clone().unwrap_or_default();
    if let Some(profile) = cli.transport_profile {
        section.profile = Some(profile);
    }
    let profile = section.profile();
    let transport_config = section.resolve();
    let warnings = transport::validate(&transport_config);
    for warning in &warnings {
        log::warn!("Transport profile '{}': {warning}", profile.name());
    }

    log::info!(
        "Starting CloudMCP {} (config {}, transport profile '{}')",
        env!("CARGO_PKG_VERSION"),
        path.display(),
        profile.name()
    );

    let registry = AccountRegistry::initialize(document, config, path, transport_config)
        .await
        .context("Account initialization failed")?;

    if cli.check {
        println!("Transport profile: {}", profile.name());
        for warning in &warnings {
            println!("  warning: {warning}");
        }
        let accounts = registry.list().await;
        println!("Accounts verified: {}", accounts.len());
        for account in accounts {
            let marker = if account.is_current { " (current)" } else { "" };
            println!("  {} - {}{marker}", account.name, account.label);
        }
        return Ok(());
    }

    let service = CloudMcpService::new(Arc::new(registry)).context("Tool registration failed")?;
    let server = service.serve(stdio()).await?;
    server.waiting().await?;

    log::info!("CloudMCP server stopped");
    Ok(())
}
