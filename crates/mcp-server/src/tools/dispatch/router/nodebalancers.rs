use std::fmt::Write;

use cloudmcp_linode::models::{CreateNodeBalancer, NodeBalancer, UpdateNodeBalancer};

use super::{tags, UpstreamExt};
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    details_header, field, item_field, join_or_none, list_header, or_none, timestamp,
};
use crate::tools::schemas::nodebalancers::{
    NodeBalancerCreateRequest, NodeBalancerIdRequest, NodeBalancerUpdateRequest,
};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register("linode_nodebalancers_list", "List NodeBalancers", nodebalancers_list)?;
    d.register(
        "linode_nodebalancer_get",
        "Get details of one NodeBalancer",
        nodebalancer_get,
    )?;
    d.register(
        "linode_nodebalancer_create",
        "Create a NodeBalancer in a region",
        nodebalancer_create,
    )?;
    d.register(
        "linode_nodebalancer_update",
        "Update a NodeBalancer's label, connection throttle or tags",
        nodebalancer_update,
    )?;
    d.register(
        "linode_nodebalancer_delete",
        "Delete a NodeBalancer and its configurations",
        nodebalancer_delete,
    )?;
    d.register(
        "linode_nodebalancer_configs_list",
        "List a NodeBalancer's port configurations and backend health",
        configs_list,
    )?;
    Ok(())
}

fn transfer(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |mb| format!("{mb:.2} MB"))
}

fn render_nodebalancer(out: &mut String, nb: &NodeBalancer) {
    field(out, "ID", nb.id);
    field(out, "Label", &nb.label);
    field(out, "Region", &nb.region);
    field(out, "Hostname", &nb.hostname);
    field(out, "IPv4", &nb.ipv4);
    field(out, "IPv6", or_none(nb.ipv6.as_deref()));
    field(out, "Client Conn Throttle", nb.client_conn_throttle);
    field(out, "Transfer In", transfer(nb.transfer.inbound));
    field(out, "Transfer Out", transfer(nb.transfer.outbound));
    field(out, "Transfer Total", transfer(nb.transfer.total));
    field(out, "Tags", join_or_none(&nb.tags));
    field(out, "Created", timestamp(nb.created.as_deref()));
}

async fn nodebalancers_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let nodebalancers = account
        .client
        .nodebalancers()
        .await
        .upstream("list NodeBalancers")?;

    let mut out = list_header(nodebalancers.len(), "NodeBalancers");
    for nb in &nodebalancers {
        let _ = writeln!(out, "ID: {} | {}", nb.id, nb.label);
        item_field(&mut out, "Region", &nb.region);
        item_field(&mut out, "Hostname", &nb.hostname);
        item_field(&mut out, "IPv4", &nb.ipv4);
        out.push('\n');
    }
    Ok(out)
}

async fn nodebalancer_get(ctx: ToolContext, p: NodeBalancerIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let nb = account
        .client
        .nodebalancer(p.nodebalancer_id)
        .await
        .upstream("get NodeBalancer")?;
    let mut out = details_header("NodeBalancer");
    render_nodebalancer(&mut out, &nb);
    Ok(out)
}

async fn nodebalancer_create(
    ctx: ToolContext,
    p: NodeBalancerCreateRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = CreateNodeBalancer {
        region: p.region,
        label: p.label,
        client_conn_throttle: p.client_conn_throttle,
        tags: tags(p.tags),
    };
    let nb = account
        .client
        .create_nodebalancer(&request)
        .await
        .upstream("create NodeBalancer")?;
    Ok(format!(
        "NodeBalancer '{}' (ID: {}) created at {} ({}).",
        nb.label, nb.id, nb.hostname, nb.ipv4
    ))
}

async fn nodebalancer_update(
    ctx: ToolContext,
    p: NodeBalancerUpdateRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = UpdateNodeBalancer {
        label: p.label,
        client_conn_throttle: p.client_conn_throttle,
        tags: p.tags,
    };
    let nb = account
        .client
        .update_nodebalancer(p.nodebalancer_id, &request)
        .await
        .upstream("update NodeBalancer")?;
    Ok(format!("NodeBalancer '{}' (ID: {}) updated.", nb.label, nb.id))
}

async fn nodebalancer_delete(
    ctx: ToolContext,
    p: NodeBalancerIdRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_nodebalancer(p.nodebalancer_id)
        .await
        .upstream("delete NodeBalancer")?;
    Ok(format!("NodeBalancer {} deleted.", p.nodebalancer_id))
}

async fn configs_list(ctx: ToolContext, p: NodeBalancerIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let configs = account
        .client
        .nodebalancer_configs(p.nodebalancer_id)
        .await
        .upstream("list NodeBalancer configs")?;

    let mut out = list_header(configs.len(), "NodeBalancer configs");
    for config in &configs {
        let _ = writeln!(out, "Config {}: port {}/{}", config.id, config.port, config.protocol);
        item_field(&mut out, "Algorithm", &config.algorithm);
        item_field(&mut out, "Stickiness", &config.stickiness);
        item_field(&mut out, "Health Check", &config.check);
        item_field(
            &mut out,
            "Nodes",
            format!(
                "{} up, {} down",
                config.nodes_status.up, config.nodes_status.down
            ),
        );
        out.push('\n');
    }
    Ok(out)
}
