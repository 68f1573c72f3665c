use std::fmt::Write;

use cloudmcp_linode::models::{
    CreateFirewall, Firewall, FirewallAddresses, FirewallRule, FirewallRules, UpdateFirewall,
};

use super::{tags, UpstreamExt};
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    details_header, field, item_field, join_or_none, list_header, or_none, timestamp,
};
use crate::tools::schemas::firewalls::{
    FirewallCreateRequest, FirewallIdRequest, FirewallRuleParam, FirewallRulesUpdateRequest,
    FirewallUpdateRequest,
};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register("linode_firewalls_list", "List Cloud Firewalls", firewalls_list)?;
    d.register(
        "linode_firewall_get",
        "Get a firewall with its full rule set",
        firewall_get,
    )?;
    d.register(
        "linode_firewall_create",
        "Create a Cloud Firewall with default policies and optional rules",
        firewall_create,
    )?;
    d.register(
        "linode_firewall_update",
        "Update a firewall's label, status (enabled/disabled) or tags",
        firewall_update,
    )?;
    d.register("linode_firewall_delete", "Delete a firewall", firewall_delete)?;
    d.register(
        "linode_firewall_rules_update",
        "Replace a firewall's entire rule set and default policies",
        rules_update,
    )?;
    d.register(
        "linode_firewall_devices_list",
        "List the instances and NodeBalancers a firewall is assigned to",
        devices_list,
    )?;
    Ok(())
}

fn to_rules(
    inbound_policy: String,
    outbound_policy: String,
    inbound: Option<Vec<FirewallRuleParam>>,
    outbound: Option<Vec<FirewallRuleParam>>,
) -> FirewallRules {
    let convert = |rules: Option<Vec<FirewallRuleParam>>| -> Vec<FirewallRule> {
        rules
            .unwrap_or_default()
            .into_iter()
            .map(|rule| FirewallRule {
                action: rule.action,
                protocol: rule.protocol,
                ports: rule.ports,
                addresses: FirewallAddresses {
                    ipv4: rule.ipv4,
                    ipv6: rule.ipv6,
                },
                label: rule.label,
                description: rule.description,
            })
            .collect()
    };
    FirewallRules {
        inbound: convert(inbound),
        inbound_policy,
        outbound: convert(outbound),
        outbound_policy,
    }
}

fn rule_line(rule: &FirewallRule) -> String {
    let mut addresses = rule.addresses.ipv4.clone().unwrap_or_default();
    addresses.extend(rule.addresses.ipv6.clone().unwrap_or_default());
    let mut line = format!(
        "{} {} ports {} from/to {}",
        rule.action,
        rule.protocol,
        or_none(rule.ports.as_deref()),
        join_or_none(&addresses)
    );
    if let Some(label) = rule.label.as_deref().filter(|l| !l.is_empty()) {
        let _ = write!(line, " [{label}]");
    }
    line
}

fn render_rules(out: &mut String, rules: &FirewallRules) {
    let _ = writeln!(out, "Inbound Policy: {}", rules.inbound_policy);
    for rule in &rules.inbound {
        let _ = writeln!(out, "  - {}", rule_line(rule));
    }
    let _ = writeln!(out, "Outbound Policy: {}", rules.outbound_policy);
    for rule in &rules.outbound {
        let _ = writeln!(out, "  - {}", rule_line(rule));
    }
}

fn render_firewall(out: &mut String, firewall: &Firewall) {
    field(out, "ID", firewall.id);
    field(out, "Label", &firewall.label);
    field(out, "Status", &firewall.status);
    field(out, "Tags", join_or_none(&firewall.tags));
    field(out, "Created", timestamp(firewall.created.as_deref()));
    field(out, "Updated", timestamp(firewall.updated.as_deref()));
    out.push_str("\nRules:\n");
    render_rules(out, &firewall.rules);
}

async fn firewalls_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let firewalls = account.client.firewalls().await.upstream("list firewalls")?;

    let mut out = list_header(firewalls.len(), "firewalls");
    for firewall in &firewalls {
        let _ = writeln!(out, "ID: {} | {}", firewall.id, firewall.label);
        item_field(&mut out, "Status", &firewall.status);
        item_field(
            &mut out,
            "Rules",
            format!(
                "{} inbound ({}), {} outbound ({})",
                firewall.rules.inbound.len(),
                firewall.rules.inbound_policy,
                firewall.rules.outbound.len(),
                firewall.rules.outbound_policy
            ),
        );
        out.push('\n');
    }
    Ok(out)
}

async fn firewall_get(ctx: ToolContext, p: FirewallIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let firewall = account
        .client
        .firewall(p.firewall_id)
        .await
        .upstream("get firewall")?;
    let mut out = details_header("Firewall");
    render_firewall(&mut out, &firewall);
    Ok(out)
}

async fn firewall_create(ctx: ToolContext, p: FirewallCreateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = CreateFirewall {
        label: p.label,
        rules: to_rules(p.inbound_policy, p.outbound_policy, p.inbound, p.outbound),
        tags: tags(p.tags),
    };
    let firewall = account
        .client
        .create_firewall(&request)
        .await
        .upstream("create firewall")?;
    Ok(format!(
        "Firewall '{}' (ID: {}) created.",
        firewall.label, firewall.id
    ))
}

async fn firewall_update(ctx: ToolContext, p: FirewallUpdateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = UpdateFirewall {
        label: p.label,
        status: p.status,
        tags: p.tags,
    };
    let firewall = account
        .client
        .update_firewall(p.firewall_id, &request)
        .await
        .upstream("update firewall")?;
    Ok(format!(
        "Firewall '{}' (ID: {}) updated. Status: {}",
        firewall.label, firewall.id, firewall.status
    ))
}

async fn firewall_delete(ctx: ToolContext, p: FirewallIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_firewall(p.firewall_id)
        .await
        .upstream("delete firewall")?;
    Ok(format!("Firewall {} deleted.", p.firewall_id))
}

async fn rules_update(
    ctx: ToolContext,
    p: FirewallRulesUpdateRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let rules = to_rules(p.inbound_policy, p.outbound_policy, p.inbound, p.outbound);
    let updated = account
        .client
        .update_firewall_rules(p.firewall_id, &rules)
        .await
        .upstream("update firewall rules")?;
    let mut out = format!("Firewall {} rules updated.\n\n", p.firewall_id);
    render_rules(&mut out, &updated);
    Ok(out)
}

async fn devices_list(ctx: ToolContext, p: FirewallIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let devices = account
        .client
        .firewall_devices(p.firewall_id)
        .await
        .upstream("list firewall devices")?;

    let mut out = list_header(devices.len(), "firewall devices");
    for device in &devices {
        let _ = writeln!(
            out,
            "Device {}: {} {} ({})",
            device.id, device.entity.kind, device.entity.id, device.entity.label
        );
    }
    Ok(out)
}
