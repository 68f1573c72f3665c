use std::fmt::Write;

use cloudmcp_linode::models::{CreateStackScript, StackScript, UpdateStackScript};
use cloudmcp_linode::ListOptions;
use serde_json::json;

use super::UpstreamExt;
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    details_header, field, item_field, join_or_none, list_header, timestamp, yes_no,
};
use crate::tools::schemas::stackscripts::{
    StackScriptCreateRequest, StackScriptIdRequest, StackScriptUpdateRequest,
    StackScriptsListRequest,
};
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register(
        "linode_stackscripts_list",
        "List StackScripts; only this account's own by default",
        stackscripts_list,
    )?;
    d.register(
        "linode_stackscript_get",
        "Get a StackScript including its script body",
        stackscript_get,
    )?;
    d.register(
        "linode_stackscript_create",
        "Create a StackScript",
        stackscript_create,
    )?;
    d.register(
        "linode_stackscript_update",
        "Update a StackScript",
        stackscript_update,
    )?;
    d.register(
        "linode_stackscript_delete",
        "Delete a StackScript",
        stackscript_delete,
    )?;
    Ok(())
}

fn render_stackscript(out: &mut String, script: &StackScript) {
    field(out, "ID", script.id);
    field(out, "Label", &script.label);
    field(out, "Author", &script.username);
    field(out, "Description", &script.description);
    field(out, "Images", join_or_none(&script.images));
    field(out, "Public", yes_no(script.is_public));
    field(out, "Revision Note", &script.rev_note);
    field(
        out,
        "Deployments",
        format!(
            "{} active / {} total",
            script.deployments_active, script.deployments_total
        ),
    );
    field(out, "Created", timestamp(script.created.as_deref()));
    field(out, "Updated", timestamp(script.updated.as_deref()));
    let _ = write!(out, "\nScript:\n{}\n", script.script);
}

async fn stackscripts_list(
    ctx: ToolContext,
    p: StackScriptsListRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let options = if p.mine.unwrap_or(true) {
        ListOptions::filtered(json!({ "mine": true }))
    } else {
        ListOptions::default()
    };
    let scripts = account
        .client
        .stackscripts(&options)
        .await
        .upstream("list StackScripts")?;

    let mut out = list_header(scripts.len(), "StackScripts");
    for script in &scripts {
        let _ = writeln!(out, "ID: {} | {}", script.id, script.label);
        item_field(&mut out, "Author", &script.username);
        item_field(&mut out, "Images", join_or_none(&script.images));
        item_field(&mut out, "Public", yes_no(script.is_public));
        out.push('\n');
    }
    Ok(out)
}

async fn stackscript_get(ctx: ToolContext, p: StackScriptIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let script = account
        .client
        .stackscript(p.stackscript_id)
        .await
        .upstream("get StackScript")?;
    let mut out = details_header("StackScript");
    render_stackscript(&mut out, &script);
    Ok(out)
}

async fn stackscript_create(
    ctx: ToolContext,
    p: StackScriptCreateRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = CreateStackScript {
        label: p.label,
        images: p.images,
        script: p.script,
        description: p.description,
        is_public: p.is_public,
        rev_note: p.rev_note,
    };
    let script = account
        .client
        .create_stackscript(&request)
        .await
        .upstream("create StackScript")?;
    Ok(format!(
        "StackScript '{}' (ID: {}) created.",
        script.label, script.id
    ))
}

async fn stackscript_update(
    ctx: ToolContext,
    p: StackScriptUpdateRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = UpdateStackScript {
        label: p.label,
        description: p.description,
        images: p.images,
        script: p.script,
        is_public: p.is_public,
        rev_note: p.rev_note,
    };
    let script = account
        .client
        .update_stackscript(p.stackscript_id, &request)
        .await
        .upstream("update StackScript")?;
    Ok(format!(
        "StackScript '{}' (ID: {}) updated.",
        script.label, script.id
    ))
}

async fn stackscript_delete(
    ctx: ToolContext,
    p: StackScriptIdRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_stackscript(p.stackscript_id)
        .await
        .upstream("delete StackScript")?;
    Ok(format!("StackScript {} deleted.", p.stackscript_id))
}
