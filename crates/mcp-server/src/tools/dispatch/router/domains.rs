use std::fmt::Write;

use cloudmcp_linode::models::{CreateDomain, CreateDomainRecord, Domain, UpdateDomain};

use super::{tags, UpstreamExt};
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{details_header, field, item_field, join_or_none, list_header, timestamp};
use crate::tools::schemas::domains::{
    DomainCreateRequest, DomainIdRequest, DomainRecordCreateRequest, DomainRecordDeleteRequest,
    DomainUpdateRequest,
};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register("linode_domains_list", "List DNS domains", domains_list)?;
    d.register("linode_domain_get", "Get details of one DNS domain", domain_get)?;
    d.register(
        "linode_domain_create",
        "Create a master or slave DNS zone",
        domain_create,
    )?;
    d.register("linode_domain_update", "Update a DNS domain", domain_update)?;
    d.register(
        "linode_domain_delete",
        "Delete a DNS domain and all of its records",
        domain_delete,
    )?;
    d.register(
        "linode_domain_records_list",
        "List the records of a DNS domain",
        records_list,
    )?;
    d.register(
        "linode_domain_record_create",
        "Create a DNS record (A, AAAA, NS, MX, CNAME, TXT, SRV or CAA)",
        record_create,
    )?;
    d.register(
        "linode_domain_record_delete",
        "Delete a DNS record",
        record_delete,
    )?;
    Ok(())
}

fn render_domain(out: &mut String, domain: &Domain) {
    field(out, "ID", domain.id);
    field(out, "Domain", &domain.domain);
    field(out, "Type", &domain.kind);
    field(out, "Status", &domain.status);
    field(out, "SOA Email", &domain.soa_email);
    field(out, "Description", &domain.description);
    field(out, "TTL", format!("{}s", domain.ttl_sec));
    field(out, "Tags", join_or_none(&domain.tags));
    field(out, "Created", timestamp(domain.created.as_deref()));
}

async fn domains_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let domains = account.client.domains().await.upstream("list domains")?;

    let mut out = list_header(domains.len(), "domains");
    for domain in &domains {
        let _ = writeln!(out, "ID: {} | {}", domain.id, domain.domain);
        item_field(&mut out, "Type", &domain.kind);
        item_field(&mut out, "Status", &domain.status);
        out.push('\n');
    }
    Ok(out)
}

async fn domain_get(ctx: ToolContext, p: DomainIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let domain = account
        .client
        .domain(p.domain_id)
        .await
        .upstream("get domain")?;
    let mut out = details_header("Domain");
    render_domain(&mut out, &domain);
    Ok(out)
}

async fn domain_create(ctx: ToolContext, p: DomainCreateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = CreateDomain {
        domain: p.domain,
        kind: p.kind,
        soa_email: p.soa_email,
        description: p.description,
        ttl_sec: p.ttl_sec,
        master_ips: p.master_ips.unwrap_or_default(),
        tags: tags(p.tags),
    };
    let domain = account
        .client
        .create_domain(&request)
        .await
        .upstream("create domain")?;
    Ok(format!(
        "Domain '{}' (ID: {}) created as {} zone.",
        domain.domain, domain.id, domain.kind
    ))
}

async fn domain_update(ctx: ToolContext, p: DomainUpdateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = UpdateDomain {
        soa_email: p.soa_email,
        description: p.description,
        status: p.status,
        ttl_sec: p.ttl_sec,
        tags: p.tags,
    };
    let domain = account
        .client
        .update_domain(p.domain_id, &request)
        .await
        .upstream("update domain")?;
    Ok(format!("Domain '{}' (ID: {}) updated.", domain.domain, domain.id))
}

async fn domain_delete(ctx: ToolContext, p: DomainIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_domain(p.domain_id)
        .await
        .upstream("delete domain")?;
    Ok(format!("Domain {} deleted.", p.domain_id))
}

async fn records_list(ctx: ToolContext, p: DomainIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let records = account
        .client
        .domain_records(p.domain_id)
        .await
        .upstream("list domain records")?;

    let mut out = list_header(records.len(), "domain records");
    for record in &records {
        let name = if record.name.is_empty() { "@" } else { record.name.as_str() };
        let _ = writeln!(out, "ID: {} | {} {} -> {}", record.id, record.kind, name, record.target);
        if matches!(record.kind.as_str(), "MX" | "SRV") {
            item_field(&mut out, "Priority", record.priority);
        }
        if record.ttl_sec > 0 {
            item_field(&mut out, "TTL", format!("{}s", record.ttl_sec));
        }
    }
    Ok(out)
}

async fn record_create(
    ctx: ToolContext,
    p: DomainRecordCreateRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = CreateDomainRecord {
        kind: p.kind,
        name: p.name,
        target: p.target,
        priority: p.priority,
        ttl_sec: p.ttl_sec,
    };
    let record = account
        .client
        .create_domain_record(p.domain_id, &request)
        .await
        .upstream("create domain record")?;
    Ok(format!(
        "{} record (ID: {}) created in domain {}: {} -> {}",
        record.kind, record.id, p.domain_id, record.name, record.target
    ))
}

async fn record_delete(
    ctx: ToolContext,
    p: DomainRecordDeleteRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_domain_record(p.domain_id, p.record_id)
        .await
        .upstream("delete domain record")?;
    Ok(format!(
        "Record {} deleted from domain {}.",
        p.record_id, p.domain_id
    ))
}
