use std::fmt::Write;

use cloudmcp_linode::models::{
    BucketAccess, CreateBucket, CreateObjectStorageKey, ObjectStorageBucket, ObjectStorageKey,
};

use super::UpstreamExt;
use crate::tools::dispatch::{DispatchError, ToolContext, ToolDispatcher};
use crate::tools::format::{
    bytes, details_header, field, item_field, list_header, redact, timestamp, yes_no,
};
use crate::tools::schemas::object_storage::{
    BucketCreateRequest, BucketRequest, KeyCreateRequest, KeyIdRequest,
};
use crate::tools::schemas::EmptyRequest;
use crate::tools::ToolError;

pub(super) fn register(d: &mut ToolDispatcher) -> Result<(), DispatchError> {
    d.register(
        "linode_objectstorage_clusters_list",
        "List Object Storage clusters",
        clusters_list,
    )?;
    d.register(
        "linode_objectstorage_buckets_list",
        "List Object Storage buckets",
        buckets_list,
    )?;
    d.register(
        "linode_objectstorage_bucket_get",
        "Get details of one bucket",
        bucket_get,
    )?;
    d.register(
        "linode_objectstorage_bucket_create",
        "Create an Object Storage bucket",
        bucket_create,
    )?;
    d.register(
        "linode_objectstorage_bucket_delete",
        "Delete an empty Object Storage bucket",
        bucket_delete,
    )?;
    d.register(
        "linode_objectstorage_keys_list",
        "List Object Storage access keys (secret keys redacted)",
        keys_list,
    )?;
    d.register(
        "linode_objectstorage_key_get",
        "Get one Object Storage access key",
        key_get,
    )?;
    d.register(
        "linode_objectstorage_key_create",
        "Create an Object Storage access key. The secret key is shown only once.",
        key_create,
    )?;
    d.register(
        "linode_objectstorage_key_delete",
        "Revoke an Object Storage access key",
        key_delete,
    )?;
    Ok(())
}

fn render_bucket(out: &mut String, bucket: &ObjectStorageBucket) {
    field(out, "Label", &bucket.label);
    field(out, "Cluster", &bucket.cluster);
    field(out, "Region", &bucket.region);
    field(out, "Hostname", &bucket.hostname);
    field(out, "Objects", bucket.objects);
    field(out, "Size", bytes(bucket.size));
    field(out, "Created", timestamp(bucket.created.as_deref()));
}

fn access_line(access: &BucketAccess) -> String {
    let location = if access.region.is_empty() {
        &access.cluster
    } else {
        &access.region
    };
    format!("{}/{}: {}", location, access.bucket_name, access.permissions)
}

/// Single-record output: the secret key is shown as returned.
fn render_key(out: &mut String, key: &ObjectStorageKey) {
    field(out, "ID", key.id);
    field(out, "Label", &key.label);
    field(out, "Access Key", &key.access_key);
    field(out, "Secret Key", &key.secret_key);
    field(out, "Limited", yes_no(key.limited));
    if let Some(access) = key.bucket_access.as_deref().filter(|a| !a.is_empty()) {
        out.push_str("Bucket Access:\n");
        for entry in access {
            let _ = writeln!(out, "  - {}", access_line(entry));
        }
    }
}

async fn clusters_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let clusters = account
        .client
        .object_storage_clusters()
        .await
        .upstream("list Object Storage clusters")?;

    let mut out = list_header(clusters.len(), "Object Storage clusters");
    for cluster in &clusters {
        let _ = writeln!(out, "{}", cluster.id);
        item_field(&mut out, "Region", &cluster.region);
        item_field(&mut out, "Status", &cluster.status);
        item_field(&mut out, "Domain", &cluster.domain);
        out.push('\n');
    }
    Ok(out)
}

async fn buckets_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let buckets = account.client.buckets().await.upstream("list buckets")?;

    let mut out = list_header(buckets.len(), "buckets");
    for bucket in &buckets {
        let _ = writeln!(out, "{}", bucket.label);
        item_field(&mut out, "Region", &bucket.region);
        item_field(&mut out, "Hostname", &bucket.hostname);
        item_field(&mut out, "Objects", bucket.objects);
        item_field(&mut out, "Size", bytes(bucket.size));
        out.push('\n');
    }
    Ok(out)
}

async fn bucket_get(ctx: ToolContext, p: BucketRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let bucket = account
        .client
        .bucket(p.cluster.trim(), p.bucket.trim())
        .await
        .upstream("get bucket")?;
    let mut out = details_header("Bucket");
    render_bucket(&mut out, &bucket);
    Ok(out)
}

async fn bucket_create(ctx: ToolContext, p: BucketCreateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let request = CreateBucket {
        label: p.label,
        cluster: p.cluster,
        region: p.region,
        acl: p.acl,
        cors_enabled: p.cors_enabled,
    };
    let bucket = account
        .client
        .create_bucket(&request)
        .await
        .upstream("create bucket")?;
    Ok(format!(
        "Bucket '{}' created at {}.",
        bucket.label, bucket.hostname
    ))
}

async fn bucket_delete(ctx: ToolContext, p: BucketRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_bucket(p.cluster.trim(), p.bucket.trim())
        .await
        .upstream("delete bucket")?;
    Ok(format!("Bucket '{}' deleted from {}.", p.bucket, p.cluster))
}

async fn keys_list(ctx: ToolContext, _: EmptyRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let keys = account
        .client
        .object_storage_keys()
        .await
        .upstream("list Object Storage keys")?;

    let mut out = list_header(keys.len(), "Object Storage keys");
    for key in &keys {
        let _ = writeln!(out, "ID: {} | {}", key.id, key.label);
        item_field(&mut out, "Access Key", &key.access_key);
        item_field(&mut out, "Secret Key", redact(&key.secret_key));
        item_field(&mut out, "Limited", yes_no(key.limited));
        out.push('\n');
    }
    Ok(out)
}

async fn key_get(ctx: ToolContext, p: KeyIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let key = account
        .client
        .object_storage_key(p.key_id)
        .await
        .upstream("get Object Storage key")?;
    let mut out = details_header("Object Storage Key");
    render_key(&mut out, &key);
    Ok(out)
}

async fn key_create(ctx: ToolContext, p: KeyCreateRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    let bucket_access = p.bucket_access.map(|entries| {
        entries
            .into_iter()
            .map(|entry| BucketAccess {
                cluster: entry.cluster.unwrap_or_default(),
                region: entry.region.unwrap_or_default(),
                bucket_name: entry.bucket_name,
                permissions: entry.permissions,
            })
            .collect()
    });
    let request = CreateObjectStorageKey {
        label: p.label,
        bucket_access,
    };
    let key = account
        .client
        .create_object_storage_key(&request)
        .await
        .upstream("create Object Storage key")?;

    let mut out = String::from(
        "Object Storage key created. Save the secret key now; it cannot be retrieved again.\n\n",
    );
    out.push_str(&details_header("Object Storage Key"));
    render_key(&mut out, &key);
    Ok(out)
}

async fn key_delete(ctx: ToolContext, p: KeyIdRequest) -> Result<String, ToolError> {
    let account = ctx.account().await?;
    account
        .client
        .delete_object_storage_key(p.key_id)
        .await
        .upstream("delete Object Storage key")?;
    Ok(format!("Object Storage key {} revoked.", p.key_id))
}
