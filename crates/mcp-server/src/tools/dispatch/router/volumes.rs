use std::fmt::Write;

use cloudmcp_linode::models::{CreateVolume, UpdateVolume, Volume};

use super::{tags, UpstreamExt};
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    details_header, field, gigabytes, item_field, join_or_none, list_header, timestamp,
};
use crate::tools::schemas::volumes::{
    VolumeAttachRequest, VolumeCreateRequest, VolumeIdRequest, VolumeResizeRequest,
    VolumeUpdateRequest,
};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register("linode_volumes_list", "List block storage volumes", volumes_list)?;
    d.register("linode_volume_get", "Get details of one volume", volume_get)?;
    d.register(
        "linode_volume_create",
        "Create a block storage volume in a region or attached to an instance",
        volume_create,
    )?;
    d.register(
        "linode_volume_update",
        "Update a volume's label or tags",
        volume_update,
    )?;
    d.register(
        "linode_volume_delete",
        "Delete a volume. It must be detached first.",
        volume_delete,
    )?;
    d.register(
        "linode_volume_attach",
        "Attach a volume to an instance in the same region",
        volume_attach,
    )?;
    d.register(
        "linode_volume_detach",
        "Detach a volume from its instance",
        volume_detach,
    )?;
    d.register(
        "linode_volume_resize",
        "Grow a volume to a larger size in GB",
        volume_resize,
    )?;
    Ok(())
}

fn attachment(volume: &Volume) -> String {
    match (volume.linode_id, volume.linode_label.as_deref()) {
        (Some(id), Some(label)) => format!("{label} (ID: {id})"),
        (Some(id), None) => format!("ID: {id}"),
        (None, _) => "Not attached".to_string(),
    }
}

fn render_volume(out: &mut String, volume: &Volume) {
    field(out, "ID", volume.id);
    field(out, "Label", &volume.label);
    field(out, "Status", &volume.status);
    field(out, "Size", gigabytes(volume.size));
    field(out, "Region", &volume.region);
    field(out, "Attached To", attachment(volume));
    field(out, "Filesystem Path", &volume.filesystem_path);
    field(out, "Tags", join_or_none(&volume.tags));
    field(out, "Created", timestamp(volume.created.as_deref()));
}

async fn volumes_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let volumes = account.client.volumes().await.upstream("list volumes")?;

    let mut out = list_header(volumes.len(), "volumes");
    for volume in &volumes {
        let _ = writeln!(out, "ID: {} | {}", volume.id, volume.label);
        item_field(&mut out, "Status", &volume.status);
        item_field(&mut out, "Size", gigabytes(volume.size));
        item_field(&mut out, "Region", &volume.region);
        item_field(&mut out, "Attached To", attachment(volume));
        out.push('\n');
    }
    Ok(out)
}

async fn volume_get(ctx: ToolContext, p: VolumeIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let volume = account
        .client
        .volume(p.volume_id)
        .await
        .upstream("get volume")?;
    let mut out = details_header("Volume");
    render_volume(&mut out, &volume);
    Ok(out)
}

async fn volume_create(ctx: ToolContext, p: VolumeCreateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = CreateVolume {
        label: p.label,
        region: p.region,
        linode_id: p.linode_id,
        size: p.size,
        tags: tags(p.tags),
    };
    let volume = account
        .client
        .create_volume(&request)
        .await
        .upstream("create volume")?;
    let mut out = format!("Volume '{}' (ID: {}) created.\n\n", volume.label, volume.id);
    out.push_str(&details_header("Volume"));
    render_volume(&mut out, &volume);
    Ok(out)
}

async fn volume_update(ctx: ToolContext, p: VolumeUpdateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = UpdateVolume {
        label: p.label,
        tags: p.tags,
    };
    let volume = account
        .client
        .update_volume(p.volume_id, &request)
        .await
        .upstream("update volume")?;
    Ok(format!("Volume '{}' (ID: {}) updated.", volume.label, volume.id))
}

async fn volume_delete(ctx: ToolContext, p: VolumeIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_volume(p.volume_id)
        .await
        .upstream("delete volume")?;
    Ok(format!("Volume {} deleted.", p.volume_id))
}

async fn volume_attach(ctx: ToolContext, p: VolumeAttachRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let volume = account
        .client
        .attach_volume(p.volume_id, p.linode_id)
        .await
        .upstream("attach volume")?;
    Ok(format!(
        "Volume '{}' (ID: {}) attached to instance {}.",
        volume.label, volume.id, p.linode_id
    ))
}

async fn volume_detach(ctx: ToolContext, p: VolumeIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .detach_volume(p.volume_id)
        .await
        .upstream("detach volume")?;
    Ok(format!("Volume {} detach initiated.", p.volume_id))
}

async fn volume_resize(ctx: ToolContext, p: VolumeResizeRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let volume = account
        .client
        .resize_volume(p.volume_id, p.size)
        .await
        .upstream("resize volume")?;
    Ok(format!(
        "Volume '{}' (ID: {}) resizing to {}.",
        volume.label,
        volume.id,
        gigabytes(p.size)
    ))
}
