use std::fmt::Write;

use cloudmcp_linode::models::{LinodeType, Region};

use super::UpstreamExt;
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    details_header, field, item_field, join_or_none, list_header, megabytes, timestamp, yes_no,
};
use crate::tools::schemas::reference::{
    KernelsListRequest, RegionGetRequest, RegionsListRequest, TypeGetRequest, TypesListRequest,
};
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register(
        "linode_regions_list",
        "List Linode regions, optionally filtered by country code",
        regions_list,
    )?;
    d.register("linode_region_get", "Get details of one region", region_get)?;
    d.register(
        "linode_types_list",
        "List Linode plans (instance types), optionally filtered by class",
        types_list,
    )?;
    d.register(
        "linode_type_get",
        "Get details and pricing of one plan",
        type_get,
    )?;
    d.register(
        "linode_kernels_list",
        "List available kernels, optionally filtered by architecture",
        kernels_list,
    )?;
    Ok(())
}

fn render_region(out: &mut String, region: &Region) {
    field(out, "ID", &region.id);
    field(out, "Label", &region.label);
    field(out, "Country", region.country.to_uppercase());
    field(out, "Status", &region.status);
    field(out, "Site Type", &region.site_type);
    field(out, "Capabilities", join_or_none(&region.capabilities));
}

fn render_type(out: &mut String, plan: &LinodeType) {
    field(out, "ID", &plan.id);
    field(out, "Label", &plan.label);
    field(out, "Class", &plan.class);
    field(out, "vCPUs", plan.vcpus);
    field(out, "Memory", megabytes(plan.memory));
    field(out, "Disk", megabytes(plan.disk));
    field(out, "Transfer", format!("{} GB", plan.transfer));
    if plan.gpus > 0 {
        field(out, "GPUs", plan.gpus);
    }
    field(
        out,
        "Price",
        format!("${:.4}/hr, ${:.2}/mo", plan.price.hourly, plan.price.monthly),
    );
}

async fn regions_list(ctx: ToolContext, p: RegionsListRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let regions = account.regions().await.upstream("list regions")?;
    let country = p.country.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let regions: Vec<&Region> = regions
        .iter()
        .filter(|r| country.map_or(true, |c| r.country.eq_ignore_ascii_case(c)))
        .collect();

    let mut out = list_header(regions.len(), "regions");
    for region in regions {
        let _ = writeln!(out, "{} ({})", region.id, region.label);
        item_field(&mut out, "Country", region.country.to_uppercase());
        item_field(&mut out, "Status", &region.status);
        out.push('\n');
    }
    Ok(out)
}

async fn region_get(ctx: ToolContext, p: RegionGetRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let regions = account.regions().await.upstream("list regions")?;
    let id = p.region_id.trim();
    let region = regions
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| ToolError::invalid("region_id", format!("unknown region '{id}'")))?;

    let mut out = details_header("Region");
    render_region(&mut out, region);
    Ok(out)
}

async fn types_list(ctx: ToolContext, p: TypesListRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let types = account.types().await.upstream("list types")?;
    let class = p.class.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let types: Vec<&LinodeType> = types
        .iter()
        .filter(|t| class.map_or(true, |c| t.class.eq_ignore_ascii_case(c)))
        .collect();

    let mut out = list_header(types.len(), "types");
    for plan in types {
        let _ = writeln!(out, "{} ({})", plan.id, plan.label);
        item_field(&mut out, "Class", &plan.class);
        item_field(
            &mut out,
            "Resources",
            format!(
                "{} vCPU, {} RAM, {} disk",
                plan.vcpus,
                megabytes(plan.memory),
                megabytes(plan.disk)
            ),
        );
        item_field(&mut out, "Monthly", format!("${:.2}", plan.price.monthly));
        out.push('\n');
    }
    Ok(out)
}

async fn type_get(ctx: ToolContext, p: TypeGetRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let types = account.types().await.upstream("list types")?;
    let id = p.type_id.trim();
    let plan = types
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| ToolError::invalid("type_id", format!("unknown type '{id}'")))?;

    let mut out = details_header("Type");
    render_type(&mut out, plan);
    Ok(out)
}

async fn kernels_list(ctx: ToolContext, p: KernelsListRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let kernels = account.kernels().await.upstream("list kernels")?;
    let arch = p.architecture.as_deref().map(str::trim).filter(|a| !a.is_empty());
    let include_deprecated = p.include_deprecated.unwrap_or(false);
    let kernels: Vec<_> = kernels
        .iter()
        .filter(|k| include_deprecated || !k.deprecated)
        .filter(|k| arch.map_or(true, |a| k.architecture.eq_ignore_ascii_case(a)))
        .collect();

    let mut out = list_header(kernels.len(), "kernels");
    for kernel in kernels {
        let _ = writeln!(out, "{} ({})", kernel.id, kernel.label);
        item_field(&mut out, "Version", &kernel.version);
        item_field(&mut out, "Architecture", &kernel.architecture);
        item_field(&mut out, "KVM", yes_no(kernel.kvm));
        if kernel.deprecated {
            item_field(&mut out, "Deprecated", "Yes");
        }
        item_field(&mut out, "Built", timestamp(kernel.built.as_deref()));
        out.push('\n');
    }
    Ok(out)
}
