use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceSpecs {
    /// MB
    pub disk: u64,
    /// MB
    pub memory: u64,
    pub vcpus: u32,
    pub transfer: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instance {
    pub id: u64,
    pub label: String,
    pub status: String,
    pub region: String,
    #[serde(rename = "type")]
    pub plan: String,
    pub image: Option<String>,
    pub ipv4: Vec<String>,
    pub ipv6: Option<String>,
    pub specs: InstanceSpecs,
    pub tags: Vec<String>,
    pub hypervisor: String,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateInstance {
    pub region: String,
    #[serde(rename = "type")]
    pub plan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_pass: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authorized_keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booted: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateInstance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRegion {
    pub region: String,
    pub status: String,
}

/// Image size is in MB.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_public: bool,
    pub deprecated: bool,
    pub size: u64,
    pub vendor: Option<String>,
    pub status: String,
    pub created: Option<String>,
    pub created_by: Option<String>,
    pub regions: Vec<ImageRegion>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateImage {
    pub disk_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
