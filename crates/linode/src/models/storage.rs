use serde::{Deserialize, Serialize};

/// Block storage volume. Size is in GB.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    pub id: u64,
    pub label: String,
    pub status: String,
    pub size: u64,
    pub region: String,
    pub linode_id: Option<u64>,
    pub linode_label: Option<String>,
    pub filesystem_path: String,
    pub tags: Vec<String>,
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVolume {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linode_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateVolume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectStorageCluster {
    pub id: String,
    pub region: String,
    pub status: String,
    pub domain: String,
    pub static_site_domain: String,
}

/// Bucket size is in bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectStorageBucket {
    pub label: String,
    pub cluster: String,
    pub region: String,
    pub hostname: String,
    pub objects: u64,
    pub size: u64,
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateBucket {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketAccess {
    pub cluster: String,
    pub region: String,
    pub bucket_name: String,
    pub permissions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectStorageKey {
    pub id: u64,
    pub label: String,
    pub access_key: String,
    pub secret_key: String,
    pub limited: bool,
    pub bucket_access: Option<Vec<BucketAccess>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateObjectStorageKey {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_access: Option<Vec<BucketAccess>>,
}
