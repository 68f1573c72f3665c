use std::fmt::Write;

use cloudmcp_linode::models::{AllocateIp, IpAddress};

use super::UpstreamExt;
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    details_header, field, item_field, join_or_none, list_header, or_none, timestamp, yes_no,
};
use crate::tools::params::require_ip;
use crate::tools::schemas::networking::{IpAddressRequest, IpAllocateRequest, IpUpdateRequest};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register("linode_ips_list", "List IP addresses on the account", ips_list)?;
    d.register(
        "linode_ip_get",
        "Get details of one IPv4 or IPv6 address",
        ip_get,
    )?;
    d.register(
        "linode_ip_update",
        "Set or reset the reverse DNS of an IP address",
        ip_update,
    )?;
    d.register(
        "linode_ip_allocate",
        "Allocate an additional IPv4 address to an instance",
        ip_allocate,
    )?;
    d.register("linode_vlans_list", "List VLANs", vlans_list)?;
    Ok(())
}

fn linode_ref(ip: &IpAddress) -> String {
    ip.linode_id
        .map_or_else(|| "None".to_string(), |id| id.to_string())
}

fn render_ip(out: &mut String, ip: &IpAddress) {
    field(out, "Address", &ip.address);
    field(out, "Type", &ip.kind);
    field(out, "Public", yes_no(ip.public));
    field(out, "Gateway", or_none(ip.gateway.as_deref()));
    field(out, "Subnet Mask", &ip.subnet_mask);
    field(out, "Prefix", ip.prefix);
    field(out, "rDNS", or_none(ip.rdns.as_deref()));
    field(out, "Linode ID", linode_ref(ip));
    field(out, "Region", &ip.region);
}

async fn ips_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let ips = account.client.ips().await.upstream("list IP addresses")?;

    let mut out = list_header(ips.len(), "IP addresses");
    for ip in &ips {
        let visibility = if ip.public { "public" } else { "private" };
        let _ = writeln!(out, "{} ({} {visibility})", ip.address, ip.kind);
        item_field(&mut out, "Linode ID", linode_ref(ip));
        item_field(&mut out, "Region", &ip.region);
        item_field(&mut out, "rDNS", or_none(ip.rdns.as_deref()));
        out.push('\n');
    }
    Ok(out)
}

async fn ip_get(ctx: ToolContext, p: IpAddressRequest) -> Result<String, ToolError> {
    let address = require_ip("address", &p.address)?;
    let account = ctx.account().await?;
    let ip = account
        .client
        .ip(&address.to_string())
        .await
        .upstream("get IP address")?;
    let mut out = details_header("IP Address");
    render_ip(&mut out, &ip);
    Ok(out)
}

async fn ip_update(ctx: ToolContext, p: IpUpdateRequest) -> Result<String, ToolError> {
    let address = require_ip("address", &p.address)?;
    let account = ctx.account().await?;
    let rdns = p.rdns.as_deref().map(str::trim).filter(|r| !r.is_empty());
    let ip = account
        .client
        .update_ip_rdns(&address.to_string(), rdns)
        .await
        .upstream("update IP address")?;
    Ok(format!(
        "Reverse DNS for {} set to {}.",
        ip.address,
        or_none(ip.rdns.as_deref())
    ))
}

async fn ip_allocate(ctx: ToolContext, p: IpAllocateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = AllocateIp {
        linode_id: p.linode_id,
        kind: p.kind,
        public: p.public,
    };
    let ip = account
        .client
        .allocate_ip(&request)
        .await
        .upstream("allocate IP address")?;
    let mut out = format!(
        "Allocated {} to instance {}.\n\n",
        ip.address, p.linode_id
    );
    out.push_str(&details_header("IP Address"));
    render_ip(&mut out, &ip);
    Ok(out)
}

async fn vlans_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let vlans = account.client.vlans().await.upstream("list VLANs")?;

    let mut out = list_header(vlans.len(), "VLANs");
    for vlan in &vlans {
        let _ = writeln!(out, "{}", vlan.label);
        item_field(&mut out, "Region", &vlan.region);
        let linodes: Vec<String> = vlan.linodes.iter().map(u64::to_string).collect();
        item_field(&mut out, "Linodes", join_or_none(&linodes));
        item_field(&mut out, "Created", timestamp(vlan.created.as_deref()));
        out.push('\n');
    }
    Ok(out)
}
