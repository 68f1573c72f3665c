use std::fmt::Write;

use cloudmcp_linode::models::LongviewClient;

use super::UpstreamExt;
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{details_header, field, item_field, list_header, redact, timestamp};
use crate::tools::schemas::longview::{LongviewClientCreateRequest, LongviewClientIdRequest};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register(
        "linode_longview_clients_list",
        "List Longview clients (API keys redacted)",
        clients_list,
    )?;
    d.register(
        "linode_longview_client_get",
        "Get one Longview client including its API key and install code",
        client_get,
    )?;
    d.register(
        "linode_longview_client_create",
        "Create a Longview client",
        client_create,
    )?;
    d.register(
        "linode_longview_client_delete",
        "Delete a Longview client",
        client_delete,
    )?;
    Ok(())
}

fn render_client(out: &mut String, client: &LongviewClient) {
    field(out, "ID", client.id);
    field(out, "Label", &client.label);
    field(out, "API Key", &client.api_key);
    field(out, "Install Code", &client.install_code);
    field(out, "Created", timestamp(client.created.as_deref()));
    field(out, "Updated", timestamp(client.updated.as_deref()));
}

async fn clients_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let clients = account
        .client
        .longview_clients()
        .await
        .upstream("list Longview clients")?;

    let mut out = list_header(clients.len(), "Longview clients");
    for client in &clients {
        let _ = writeln!(out, "ID: {} | {}", client.id, client.label);
        item_field(&mut out, "API Key", redact(&client.api_key));
        item_field(&mut out, "Created", timestamp(client.created.as_deref()));
        out.push('\n');
    }
    Ok(out)
}

async fn client_get(ctx: ToolContext, p: LongviewClientIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let client = account
        .client
        .longview_client(p.client_id)
        .await
        .upstream("get Longview client")?;
    let mut out = details_header("Longview Client");
    render_client(&mut out, &client);
    Ok(out)
}

async fn client_create(
    ctx: ToolContext,
    p: LongviewClientCreateRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let label = p.label.as_deref().map(str::trim).filter(|l| !l.is_empty());
    let client = account
        .client
        .create_longview_client(label)
        .await
        .upstream("create Longview client")?;
    let mut out = format!(
        "Longview client '{}' (ID: {}) created.\n\n",
        client.label, client.id
    );
    out.push_str(&details_header("Longview Client"));
    render_client(&mut out, &client);
    Ok(out)
}

async fn client_delete(
    ctx: ToolContext,
    p: LongviewClientIdRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_longview_client(p.client_id)
        .await
        .upstream("delete Longview client")?;
    Ok(format!("Longview client {} deleted.", p.client_id))
}
