use std::collections::HashMap;
use std::fmt::Write;

use cloudmcp_linode::models::{
    CreateImage, CreateInstance, Image, Instance, UpdateImage, UpdateInstance,
};
use cloudmcp_linode::ListOptions;
use serde_json::{json, Map, Value};

use super::{tags, UpstreamExt};
use crate::accounts::Account;
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    compact_json, details_header, field, item_field, join_or_none, list_header, megabytes,
    or_none, timestamp, yes_no,
};
use crate::tools::schemas::compute::{
    ImageCreateRequest, ImageIdRequest, ImageReplicateRequest, ImageUpdateRequest,
    ImagesListRequest, InstanceCreateRequest, InstanceIdRequest, InstanceResizeRequest,
    InstanceUpdateRequest, InstancesListRequest,
};
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register(
        "linode_instances_list",
        "List Linode instances, optionally filtered by status, region or tag",
        instances_list,
    )?;
    d.register(
        "linode_instances_list_json",
        "List Linode instances as JSON",
        instances_list_json,
    )?;
    d.register("linode_instance_get", "Get details of one instance", instance_get)?;
    d.register("linode_instance_create", "Create a Linode instance", instance_create)?;
    d.register(
        "linode_instance_update",
        "Update an instance's label or tags",
        instance_update,
    )?;
    d.register(
        "linode_instance_delete",
        "Delete an instance and all of its disks. This cannot be undone.",
        instance_delete,
    )?;
    d.register("linode_instance_boot", "Boot an instance", instance_boot)?;
    d.register("linode_instance_reboot", "Reboot an instance", instance_reboot)?;
    d.register(
        "linode_instance_shutdown",
        "Shut down an instance",
        instance_shutdown,
    )?;
    d.register(
        "linode_instance_resize",
        "Resize an instance to another plan. The instance is shut down during the resize.",
        instance_resize,
    )?;
    d.register(
        "linode_images_list",
        "List images, optionally only public or only private ones",
        images_list,
    )?;
    d.register("linode_image_get", "Get details of one image", image_get)?;
    d.register(
        "linode_image_create",
        "Capture a private image from an instance disk",
        image_create,
    )?;
    d.register(
        "linode_image_update",
        "Update a private image's label, description or tags",
        image_update,
    )?;
    d.register("linode_image_delete", "Delete a private image", image_delete)?;
    d.register(
        "linode_image_replicate",
        "Set the regions a private image is replicated to",
        image_replicate,
    )?;
    Ok(())
}

fn instance_filter(p: &InstancesListRequest) -> ListOptions {
    let mut filter = Map::new();
    if let Some(status) = p.status.as_deref().filter(|s| !s.is_empty()) {
        filter.insert("status".into(), json!(status));
    }
    if let Some(region) = p.region.as_deref().filter(|s| !s.is_empty()) {
        filter.insert("region".into(), json!(region));
    }
    if let Some(tag) = p.tag.as_deref().filter(|s| !s.is_empty()) {
        filter.insert("tags".into(), json!(tag));
    }
    if filter.is_empty() {
        ListOptions::default()
    } else {
        ListOptions::filtered(Value::Object(filter))
    }
}

fn render_instance(out: &mut String, instance: &Instance) {
    field(out, "ID", instance.id);
    field(out, "Label", &instance.label);
    field(out, "Status", &instance.status);
    field(out, "Region", &instance.region);
    field(out, "Type", &instance.plan);
    field(out, "Image", or_none(instance.image.as_deref()));
    field(out, "IPv4", join_or_none(&instance.ipv4));
    field(out, "IPv6", or_none(instance.ipv6.as_deref()));
    field(out, "vCPUs", instance.specs.vcpus);
    field(out, "Memory", megabytes(instance.specs.memory));
    field(out, "Disk", megabytes(instance.specs.disk));
    field(out, "Tags", join_or_none(&instance.tags));
    field(out, "Created", timestamp(instance.created.as_deref()));
    field(out, "Updated", timestamp(instance.updated.as_deref()));
}

async fn instances_list(ctx: ToolContext, p: InstancesListRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let instances = account
        .client
        .instances(&instance_filter(&p))
        .await
        .upstream("list instances")?;

    let mut out = list_header(instances.len(), "Linode instances");
    for instance in &instances {
        let _ = writeln!(out, "ID: {} | {}", instance.id, instance.label);
        item_field(&mut out, "Status", &instance.status);
        item_field(&mut out, "Region", &instance.region);
        item_field(&mut out, "Type", &instance.plan);
        item_field(&mut out, "IPv4", join_or_none(&instance.ipv4));
        out.push('\n');
    }
    Ok(out)
}

async fn instances_list_json(
    ctx: ToolContext,
    p: InstancesListRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let instances = account
        .client
        .instances(&instance_filter(&p))
        .await
        .upstream("list instances")?;
    compact_json(&json!({
        "account": account.name,
        "count": instances.len(),
        "instances": instances,
    }))
}

async fn instance_get(ctx: ToolContext, p: InstanceIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let instance = account
        .client
        .instance(p.instance_id)
        .await
        .upstream("get instance")?;
    let mut out = details_header("Instance");
    render_instance(&mut out, &instance);
    Ok(out)
}

async fn instance_create(ctx: ToolContext, p: InstanceCreateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = CreateInstance {
        region: p.region,
        plan: p.plan,
        label: p.label,
        image: p.image,
        root_pass: p.root_pass,
        authorized_keys: p.authorized_keys.unwrap_or_default(),
        tags: tags(p.tags),
        private_ip: p.private_ip,
        booted: p.booted,
    };
    let instance = account
        .client
        .create_instance(&request)
        .await
        .upstream("create instance")?;

    let mut out = format!(
        "Instance '{}' (ID: {}) created.\n\n",
        instance.label, instance.id
    );
    out.push_str(&details_header("Instance"));
    render_instance(&mut out, &instance);
    Ok(out)
}

async fn instance_update(ctx: ToolContext, p: InstanceUpdateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = UpdateInstance {
        label: p.label,
        tags: p.tags,
    };
    let instance = account
        .client
        .update_instance(p.instance_id, &request)
        .await
        .upstream("update instance")?;
    Ok(format!(
        "Instance '{}' (ID: {}) updated.",
        instance.label, instance.id
    ))
}

async fn instance_delete(ctx: ToolContext, p: InstanceIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_instance(p.instance_id)
        .await
        .upstream("delete instance")?;
    Ok(format!("Instance {} deleted.", p.instance_id))
}

async fn instance_boot(ctx: ToolContext, p: InstanceIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .boot_instance(p.instance_id)
        .await
        .upstream("boot instance")?;
    Ok(format!("Boot initiated for instance {}.", p.instance_id))
}

async fn instance_reboot(ctx: ToolContext, p: InstanceIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .reboot_instance(p.instance_id)
        .await
        .upstream("reboot instance")?;
    Ok(format!("Reboot initiated for instance {}.", p.instance_id))
}

async fn instance_shutdown(ctx: ToolContext, p: InstanceIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .shutdown_instance(p.instance_id)
        .await
        .upstream("shut down instance")?;
    Ok(format!("Shutdown initiated for instance {}.", p.instance_id))
}

async fn instance_resize(ctx: ToolContext, p: InstanceResizeRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .resize_instance(p.instance_id, &p.plan)
        .await
        .upstream("resize instance")?;
    Ok(format!(
        "Resize of instance {} to {} initiated.",
        p.instance_id, p.plan
    ))
}

fn render_image(out: &mut String, image: &Image, region_labels: &HashMap<String, String>) {
    field(out, "ID", &image.id);
    field(out, "Label", &image.label);
    field(out, "Description", or_none(image.description.as_deref()));
    field(out, "Type", &image.kind);
    field(out, "Status", &image.status);
    field(out, "Public", yes_no(image.is_public));
    field(out, "Size", megabytes(image.size));
    field(out, "Vendor", or_none(image.vendor.as_deref()));
    field(out, "Deprecated", yes_no(image.deprecated));
    field(out, "Regions", join_or_none(&image_regions(image, region_labels)));
    field(out, "Tags", join_or_none(&image.tags));
    field(out, "Created", timestamp(image.created.as_deref()));
    field(out, "Created By", or_none(image.created_by.as_deref()));
}

fn image_regions(image: &Image, region_labels: &HashMap<String, String>) -> Vec<String> {
    image
        .regions
        .iter()
        .map(|r| match region_labels.get(&r.region) {
            Some(label) => format!("{} ({label}, {})", r.region, r.status),
            None => format!("{} ({})", r.region, r.status),
        })
        .collect()
}

/// Region ID to label via the reference cache. A failed lookup degrades to bare IDs.
async fn region_labels(account: &Account) -> HashMap<String, String> {
    match account.regions().await {
        Ok(regions) => regions.into_iter().map(|r| (r.id, r.label)).collect(),
        Err(err) => {
            log::warn!("Region lookup for image listing failed: {err}");
            HashMap::new()
        }
    }
}

async fn images_list(ctx: ToolContext, p: ImagesListRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let options = match p.is_public {
        Some(public) => ListOptions::filtered(json!({ "is_public": public })),
        None => ListOptions::default(),
    };
    let images = account.client.images(&options).await.upstream("list images")?;
    let labels = region_labels(&account).await;

    let mut out = list_header(images.len(), "images");
    for image in &images {
        let _ = writeln!(out, "{} ({})", image.id, image.label);
        item_field(&mut out, "Status", &image.status);
        item_field(&mut out, "Size", megabytes(image.size));
        item_field(&mut out, "Public", yes_no(image.is_public));
        item_field(&mut out, "Regions", join_or_none(&image_regions(image, &labels)));
        out.push('\n');
    }
    Ok(out)
}

async fn image_get(ctx: ToolContext, p: ImageIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let image = account
        .client
        .image(p.image_id.trim())
        .await
        .upstream("get image")?;
    let labels = region_labels(&account).await;
    let mut out = details_header("Image");
    render_image(&mut out, &image, &labels);
    Ok(out)
}

async fn image_create(ctx: ToolContext, p: ImageCreateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = CreateImage {
        disk_id: p.disk_id,
        label: p.label,
        description: p.description,
        tags: tags(p.tags),
    };
    let image = account
        .client
        .create_image(&request)
        .await
        .upstream("create image")?;
    Ok(format!(
        "Image '{}' (ID: {}) is being created from disk {}. Status: {}",
        image.label, image.id, p.disk_id, image.status
    ))
}

async fn image_update(ctx: ToolContext, p: ImageUpdateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = UpdateImage {
        label: p.label,
        description: p.description,
        tags: p.tags,
    };
    let image = account
        .client
        .update_image(p.image_id.trim(), &request)
        .await
        .upstream("update image")?;
    Ok(format!("Image '{}' (ID: {}) updated.", image.label, image.id))
}

async fn image_delete(ctx: ToolContext, p: ImageIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let id = p.image_id.trim();
    account.client.delete_image(id).await.upstream("delete image")?;
    Ok(format!("Image {id} deleted."))
}

async fn image_replicate(ctx: ToolContext, p: ImageReplicateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let regions: Vec<String> = p
        .regions
        .iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();
    let image = account
        .client
        .replicate_image(p.image_id.trim(), &regions)
        .await
        .upstream("replicate image")?;
    Ok(format!(
        "Image '{}' (ID: {}) replication set to: {}",
        image.label,
        image.id,
        regions.join(", ")
    ))
}
