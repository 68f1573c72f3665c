mod support;

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rmcp::model::CallToolRequestParam;
use rmcp::service::{RoleClient, RunningService, ServiceExt};
use rmcp::transport::TokioChildProcess;
use support::{locate_cloudmcp_bin, write_config, MockLinode, PROD_TOKEN};
use tokio::process::Command;

const CLEARED_ENV: [&str; 8] = [
    "CLOUDMCP_CONFIG",
    "CLOUDMCP_DEFAULT_ACCOUNT",
    "CLOUDMCP_LOG_LEVEL",
    "CLOUDMCP_CACHE_TTL_SECS",
    "CLOUDMCP_TRANSPORT_PROFILE",
    "LINODE_TOKEN",
    "LINODE_API_URL",
    "LINODE_ACCOUNT_LABEL",
];

async fn spawn(config: &Path) -> Result<RunningService<RoleClient, ()>> {
    let mut cmd = Command::new(locate_cloudmcp_bin()?);
    for var in CLEARED_ENV {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "warn");
    cmd.arg("--config").arg(config);

    let transport = TokioChildProcess::new(cmd).context("spawn mcp server")?;
    tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")?
        .context("MCP handshake failed")
}

async fn call_text(
    service: &RunningService<RoleClient, ()>,
    name: &str,
    arguments: serde_json::Value,
) -> Result<(bool, String)> {
    let result = tokio::time::timeout(
        Duration::from_secs(10),
        service.call_tool(CallToolRequestParam {
            name: name.to_string().into(),
            arguments: arguments.as_object().cloned(),
        }),
    )
    .await
    .with_context(|| format!("timeout calling {name}"))??;
    let text = result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default();
    Ok((result.is_error == Some(true), text))
}

#[tokio::test]
async fn stdio_server_starts_without_accounts() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let service = spawn(&tmp.path().join("absent.toml")).await?;

    let tools = tokio::time::timeout(
        Duration::from_secs(10),
        service.list_tools(Default::default()),
    )
    .await
    .context("timeout listing tools")??;
    let names: HashSet<&str> = tools.tools.iter().map(|t| t.name.as_ref()).collect();
    for expected in [
        "linode_account_list",
        "linode_account_switch",
        "linode_instances_list",
        "cloudmcp_version_json",
        "cloudmcp_account_add",
    ] {
        assert!(names.contains(expected), "missing tool '{expected}'");
    }

    let (is_error, text) = call_text(&service, "linode_account_list", serde_json::json!({})).await?;
    assert!(!is_error);
    assert_eq!(text, "No configured accounts found.");

    let (is_error, text) =
        call_text(&service, "cloudmcp_version_json", serde_json::json!({})).await?;
    assert!(!is_error, "{text}");
    let parsed: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(parsed["service"], "cloudmcp");
    assert!(parsed["current_account"].is_null());

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}

#[tokio::test]
async fn stdio_server_talks_to_the_configured_api() -> Result<()> {
    let mock = MockLinode::start().await;
    let tmp = tempfile::tempdir()?;
    let config = write_config(tmp.path(), &mock, &[("primary", "Primary", PROD_TOKEN)], "primary");
    let service = spawn(&config).await?;

    let (is_error, text) =
        call_text(&service, "linode_instances_list", serde_json::json!({})).await?;
    assert!(!is_error, "{text}");
    assert!(text.contains("prod-web-01"), "{text}");
    assert!(mock.hits("GET /profile") >= 1);

    let (is_error, text) = call_text(
        &service,
        "linode_account_switch",
        serde_json::json!({"account_name": "missing"}),
    )
    .await?;
    assert!(is_error);
    assert_eq!(text, "Error: Account 'missing' not found");

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}
