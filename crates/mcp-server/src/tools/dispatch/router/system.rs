use std::fmt::Write;

use serde_json::json;

use crate::reference_cache::CatalogueStats;
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{compact_json, field};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;
use crate::version::{BuildInfo, SERVICE_NAME};

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register(
        "cloudmcp_version",
        "Show CloudMCP version, build information and the current account",
        version,
    )?;
    d.register(
        "cloudmcp_version_json",
        "CloudMCP version and build information as JSON",
        version_json,
    )?;
    d.register(
        "cloudmcp_cache_stats",
        "Show reference-data cache statistics (regions, types, kernels) for the current account",
        cache_stats,
    )?;
    Ok(())
}

async fn version(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let info = BuildInfo::current();
    let current = ctx.registry().current_name().await;

    let mut out = String::from("CloudMCP Version Information:\n");
    field(&mut out, "Version", info.version);
    field(&mut out, "API Version", info.api_version);
    field(&mut out, "Build Date", info.build_date);
    field(&mut out, "Git Commit", info.git_commit);
    field(&mut out, "Git Branch", info.git_branch);
    field(&mut out, "Rust Version", info.rust_version);
    field(&mut out, "Platform", &info.platform);
    field(&mut out, "Current Account", current.as_deref().unwrap_or("None"));
    out.push_str("\nFeatures:\n");
    for (name, enabled) in &info.features {
        let state = if *enabled { "enabled" } else { "disabled" };
        let _ = writeln!(out, "  {name}: {state}");
    }
    Ok(out)
}

async fn version_json(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let current = ctx.registry().current_name().await;
    compact_json(&json!({
        "cloudmcp": BuildInfo::current(),
        "current_account": current,
        "service": SERVICE_NAME,
    }))
}

fn catalogue_line(out: &mut String, name: &str, stats: &CatalogueStats) {
    let state = if stats.populated {
        format!("{} cached", stats.count)
    } else {
        "not cached".to_string()
    };
    let _ = writeln!(out, "  {name}: {state}");
}

async fn cache_stats(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let stats = account.catalog.stats().await;

    let mut out = format!("Reference Cache ({}):\n", account.name);
    field(&mut out, "TTL", format!("{}s", stats.ttl.as_secs()));
    let expiry = match (stats.expiry, stats.expires_in) {
        (None, _) => "never populated".to_string(),
        (Some(_), Some(left)) => format!("in {}s", left.as_secs()),
        (Some(_), None) => "expired".to_string(),
    };
    field(&mut out, "Expires", expiry);
    out.push_str("Catalogues:\n");
    catalogue_line(&mut out, "regions", &stats.regions);
    catalogue_line(&mut out, "types", &stats.types);
    catalogue_line(&mut out, "kernels", &stats.kernels);
    Ok(out)
}
