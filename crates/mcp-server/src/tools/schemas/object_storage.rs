use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{plain_params, require_non_empty, require_one_of, ToolParams};
use crate::tools::ToolError;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BucketRequest {
    /// Cluster or region ID, e.g. "us-east-1"
    pub cluster: String,
    /// Bucket label
    pub bucket: String,
}

impl ToolParams for BucketRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("cluster", &self.cluster)?;
        require_non_empty("bucket", &self.bucket)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BucketCreateRequest {
    /// Bucket label (DNS-compatible)
    pub label: String,
    /// Cluster ID; prefer region for new buckets
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// private, public-read, authenticated-read or public-read-write
    #[serde(default)]
    pub acl: Option<String>,
    #[serde(default)]
    pub cors_enabled: Option<bool>,
}

impl ToolParams for BucketCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("label", &self.label)?;
        if self.cluster.is_none() && self.region.is_none() {
            return Err(ToolError::invalid("region", "either region or cluster is required"));
        }
        if let Some(acl) = &self.acl {
            require_one_of(
                "acl",
                acl,
                &["private", "public-read", "authenticated-read", "public-read-write"],
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct KeyIdRequest {
    /// Access key ID
    pub key_id: u64,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct BucketAccessParam {
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub bucket_name: String,
    /// read_only or read_write
    pub permissions: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct KeyCreateRequest {
    pub label: String,
    /// Restrict the key to these buckets; omit for full access
    #[serde(default)]
    pub bucket_access: Option<Vec<BucketAccessParam>>,
}

impl ToolParams for KeyCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("label", &self.label)?;
        for (i, access) in self.bucket_access.as_deref().unwrap_or_default().iter().enumerate() {
            require_non_empty(&format!("bucket_access[{i}].bucket_name"), &access.bucket_name)?;
            require_one_of(
                &format!("bucket_access[{i}].permissions"),
                &access.permissions,
                &["read_only", "read_write"],
            )?;
        }
        Ok(())
    }
}

plain_params!(KeyIdRequest);
