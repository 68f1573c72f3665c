use std::fmt::Write;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use cloudmcp_linode::models::{CreateLkeCluster, LkeCluster, LkeNodePoolSpec};

use super::{tags, UpstreamExt};
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    details_header, field, item_field, join_or_none, list_header, timestamp, yes_no,
};
use crate::tools::schemas::lke::{LkeClusterCreateRequest, LkeClusterIdRequest};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register(
        "linode_lke_clusters_list",
        "List Kubernetes (LKE) clusters",
        clusters_list,
    )?;
    d.register(
        "linode_lke_cluster_get",
        "Get details of one LKE cluster",
        cluster_get,
    )?;
    d.register(
        "linode_lke_cluster_create",
        "Create an LKE cluster with one or more node pools",
        cluster_create,
    )?;
    d.register(
        "linode_lke_cluster_delete",
        "Delete an LKE cluster and all of its nodes",
        cluster_delete,
    )?;
    d.register(
        "linode_lke_pools_list",
        "List the node pools of an LKE cluster",
        pools_list,
    )?;
    d.register(
        "linode_lke_kubeconfig_get",
        "Get the decoded kubeconfig of an LKE cluster",
        kubeconfig_get,
    )?;
    d.register(
        "linode_lke_versions_list",
        "List available Kubernetes versions",
        versions_list,
    )?;
    Ok(())
}

fn render_cluster(out: &mut String, cluster: &LkeCluster) {
    field(out, "ID", cluster.id);
    field(out, "Label", &cluster.label);
    field(out, "Region", &cluster.region);
    field(out, "Kubernetes Version", &cluster.k8s_version);
    field(out, "Status", &cluster.status);
    field(
        out,
        "HA Control Plane",
        yes_no(cluster.control_plane.high_availability),
    );
    field(out, "Tags", join_or_none(&cluster.tags));
    field(out, "Created", timestamp(cluster.created.as_deref()));
    field(out, "Updated", timestamp(cluster.updated.as_deref()));
}

async fn clusters_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let clusters = account
        .client
        .lke_clusters()
        .await
        .upstream("list LKE clusters")?;

    let mut out = list_header(clusters.len(), "LKE clusters");
    for cluster in &clusters {
        let _ = writeln!(out, "ID: {} | {}", cluster.id, cluster.label);
        item_field(&mut out, "Region", &cluster.region);
        item_field(&mut out, "Version", &cluster.k8s_version);
        item_field(&mut out, "Status", &cluster.status);
        out.push('\n');
    }
    Ok(out)
}

async fn cluster_get(ctx: ToolContext, p: LkeClusterIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let cluster = account
        .client
        .lke_cluster(p.cluster_id)
        .await
        .upstream("get LKE cluster")?;
    let mut out = details_header("LKE Cluster");
    render_cluster(&mut out, &cluster);
    Ok(out)
}

async fn cluster_create(
    ctx: ToolContext,
    p: LkeClusterCreateRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let node_pools = p
        .node_pools
        .into_iter()
        .map(|pool| LkeNodePoolSpec {
            plan: pool.plan,
            count: pool.count,
        })
        .collect();
    let request = CreateLkeCluster {
        label: p.label,
        region: p.region,
        k8s_version: p.k8s_version,
        node_pools,
        tags: tags(p.tags),
    };
    let cluster = account
        .client
        .create_lke_cluster(&request)
        .await
        .upstream("create LKE cluster")?;
    Ok(format!(
        "LKE cluster '{}' (ID: {}) created in {} with Kubernetes {}.",
        cluster.label, cluster.id, cluster.region, cluster.k8s_version
    ))
}

async fn cluster_delete(ctx: ToolContext, p: LkeClusterIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_lke_cluster(p.cluster_id)
        .await
        .upstream("delete LKE cluster")?;
    Ok(format!("LKE cluster {} deleted.", p.cluster_id))
}

async fn pools_list(ctx: ToolContext, p: LkeClusterIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let pools = account
        .client
        .lke_pools(p.cluster_id)
        .await
        .upstream("list LKE node pools")?;

    let mut out = list_header(pools.len(), "node pools");
    for pool in &pools {
        let _ = writeln!(out, "Pool {}: {} x {}", pool.id, pool.count, pool.plan);
        let ready = pool.nodes.iter().filter(|n| n.status == "ready").count();
        item_field(&mut out, "Nodes Ready", format!("{ready}/{}", pool.nodes.len()));
        item_field(&mut out, "Tags", join_or_none(&pool.tags));
        out.push('\n');
    }
    Ok(out)
}

fn malformed_kubeconfig(message: String) -> ToolError {
    ToolError::Upstream {
        action: "get kubeconfig".into(),
        message: format!("kubeconfig is {message}"),
    }
}

async fn kubeconfig_get(ctx: ToolContext, p: LkeClusterIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let encoded = account
        .client
        .lke_kubeconfig(p.cluster_id)
        .await
        .upstream("get kubeconfig")?;
    let decoded = STANDARD
        .decode(encoded.kubeconfig.trim())
        .map_err(|err| malformed_kubeconfig(format!("not valid base64: {err}")))?;
    let kubeconfig = String::from_utf8(decoded)
        .map_err(|err| malformed_kubeconfig(format!("not valid UTF-8: {err}")))?;
    Ok(format!(
        "Kubeconfig for LKE cluster {}:\n\n{kubeconfig}",
        p.cluster_id
    ))
}

async fn versions_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let versions = account
        .client
        .lke_versions()
        .await
        .upstream("list Kubernetes versions")?;
    let mut out = list_header(versions.len(), "Kubernetes versions");
    for version in &versions {
        let _ = writeln!(out, "- {}", version.id);
    }
    Ok(out)
}
