use std::fmt::Write;

use cloudmcp_linode::models::{CreateDatabase, Database};

use super::UpstreamExt;
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    details_header, field, item_field, join_or_none, list_header, or_none, timestamp, yes_no,
};
use crate::tools::schemas::databases::{DatabaseCreateRequest, DatabaseIdRequest};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register(
        "linode_databases_list",
        "List managed databases of every engine",
        databases_list,
    )?;
    d.register(
        "linode_database_engines_list",
        "List available managed database engines and versions",
        engines_list,
    )?;
    d.register(
        "linode_database_get",
        "Get details of one managed database",
        database_get,
    )?;
    d.register(
        "linode_database_create",
        "Create a managed MySQL or PostgreSQL database",
        database_create,
    )?;
    d.register(
        "linode_database_delete",
        "Delete a managed database",
        database_delete,
    )?;
    d.register(
        "linode_database_credentials_get",
        "Get the root credentials of a managed database",
        credentials_get,
    )?;
    Ok(())
}

fn render_database(out: &mut String, db: &Database) {
    field(out, "ID", db.id);
    field(out, "Label", &db.label);
    field(out, "Engine", format!("{} {}", db.engine, db.version));
    field(out, "Region", &db.region);
    field(out, "Type", &db.plan);
    field(out, "Status", &db.status);
    field(out, "Cluster Size", db.cluster_size);
    field(out, "Primary Host", or_none(db.hosts.primary.as_deref()));
    field(out, "Secondary Host", or_none(db.hosts.secondary.as_deref()));
    field(out, "Port", db.port);
    field(out, "SSL", yes_no(db.ssl_connection));
    field(out, "Allow List", join_or_none(&db.allow_list));
    field(out, "Created", timestamp(db.created.as_deref()));
    field(out, "Updated", timestamp(db.updated.as_deref()));
}

async fn databases_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let databases = account
        .client
        .databases()
        .await
        .upstream("list databases")?;

    let mut out = list_header(databases.len(), "databases");
    for db in &databases {
        let _ = writeln!(out, "ID: {} | {}", db.id, db.label);
        item_field(&mut out, "Engine", format!("{} {}", db.engine, db.version));
        item_field(&mut out, "Region", &db.region);
        item_field(&mut out, "Status", &db.status);
        out.push('\n');
    }
    Ok(out)
}

async fn engines_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let engines = account
        .client
        .database_engines()
        .await
        .upstream("list database engines")?;
    let mut out = list_header(engines.len(), "database engines");
    for engine in &engines {
        let _ = writeln!(out, "- {} ({} {})", engine.id, engine.engine, engine.version);
    }
    Ok(out)
}

async fn database_get(ctx: ToolContext, p: DatabaseIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let db = account
        .client
        .database(&p.engine, p.database_id)
        .await
        .upstream("get database")?;
    let mut out = details_header("Database");
    render_database(&mut out, &db);
    Ok(out)
}

async fn database_create(
    ctx: ToolContext,
    p: DatabaseCreateRequest,
) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let family = p.engine_family().to_string();
    let request = CreateDatabase {
        label: p.label,
        region: p.region,
        plan: p.plan,
        engine: p.engine,
        cluster_size: p.cluster_size,
        allow_list: p.allow_list.unwrap_or_default(),
    };
    let db = account
        .client
        .create_database(&family, &request)
        .await
        .upstream("create database")?;
    Ok(format!(
        "Database '{}' (ID: {}) is being provisioned. Status: {}",
        db.label, db.id, db.status
    ))
}

async fn database_delete(ctx: ToolContext, p: DatabaseIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_database(&p.engine, p.database_id)
        .await
        .upstream("delete database")?;
    Ok(format!("Database {} deleted.", p.database_id))
}

async fn credentials_get(ctx: ToolContext, p: DatabaseIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let credentials = account
        .client
        .database_credentials(&p.engine, p.database_id)
        .await
        .upstream("get database credentials")?;
    let mut out = details_header("Database Credentials");
    field(&mut out, "Database ID", p.database_id);
    field(&mut out, "Username", &credentials.username);
    field(&mut out, "Password", &credentials.password);
    Ok(out)
}
