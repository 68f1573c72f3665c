use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{plain_params, require_non_empty, ToolParams};
use crate::tools::ToolError;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct InstancesListRequest {
    /// Only instances with this status (running, offline, booting, ...)
    #[serde(default)]
    pub status: Option<String>,
    /// Only instances in this region
    #[serde(default)]
    pub region: Option<String>,
    /// Only instances carrying this tag
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InstanceIdRequest {
    /// Linode instance ID
    pub instance_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InstanceCreateRequest {
    /// Region to deploy in, e.g. "us-east"
    pub region: String,
    /// Plan ID, e.g. "g6-nanode-1"
    #[serde(rename = "type")]
    pub plan: String,
    /// Instance label
    #[serde(default)]
    pub label: Option<String>,
    /// Image to deploy, e.g. "linode/ubuntu24.04". Requires root_pass.
    #[serde(default)]
    pub image: Option<String>,
    /// Root password for the deployed image
    #[serde(default)]
    pub root_pass: Option<String>,
    /// SSH public keys for root
    #[serde(default)]
    pub authorized_keys: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Add a private IPv4 address
    #[serde(default)]
    pub private_ip: Option<bool>,
    /// Boot after creation (default: true when an image is given)
    #[serde(default)]
    pub booted: Option<bool>,
}

impl ToolParams for InstanceCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("region", &self.region)?;
        require_non_empty("type", &self.plan)?;
        if self.image.is_some() && self.root_pass.as_deref().map_or(true, |p| p.is_empty()) {
            return Err(ToolError::invalid(
                "root_pass",
                "is required when an image is given",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InstanceUpdateRequest {
    /// Linode instance ID
    pub instance_id: u64,
    /// New label
    #[serde(default)]
    pub label: Option<String>,
    /// Replacement tag set
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ToolParams for InstanceUpdateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        if self.label.is_none() && self.tags.is_none() {
            return Err(ToolError::invalid(
                "instance_id",
                "nothing to update; pass label or tags",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InstanceResizeRequest {
    /// Linode instance ID
    pub instance_id: u64,
    /// Target plan ID
    #[serde(rename = "type")]
    pub plan: String,
}

impl ToolParams for InstanceResizeRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("type", &self.plan)
    }
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ImagesListRequest {
    /// true: only public (distribution) images; false: only private images
    #[serde(default)]
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImageIdRequest {
    /// Image ID, e.g. "private/12345" or "linode/debian12"
    pub image_id: String,
}

impl ToolParams for ImageIdRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("image_id", &self.image_id)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImageCreateRequest {
    /// Disk to capture
    pub disk_id: u64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImageUpdateRequest {
    /// Private image ID
    pub image_id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ToolParams for ImageUpdateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("image_id", &self.image_id)?;
        if self.label.is_none() && self.description.is_none() && self.tags.is_none() {
            return Err(ToolError::invalid(
                "image_id",
                "nothing to update; pass label, description or tags",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImageReplicateRequest {
    /// Private image ID
    pub image_id: String,
    /// Complete list of regions the image should be available in
    pub regions: Vec<String>,
}

impl ToolParams for ImageReplicateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("image_id", &self.image_id)?;
        if self.regions.iter().all(|r| r.trim().is_empty()) {
            return Err(ToolError::invalid("regions", "must name at least one region"));
        }
        Ok(())
    }
}

plain_params!(
    InstancesListRequest,
    InstanceIdRequest,
    ImagesListRequest,
    ImageCreateRequest
);
