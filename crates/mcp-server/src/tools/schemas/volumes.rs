use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{plain_params, require_non_empty, require_positive, ToolParams};
use crate::tools::ToolError;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct VolumeIdRequest {
    /// Volume ID
    pub volume_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct VolumeCreateRequest {
    pub label: String,
    /// Size in GB (default: 20)
    #[serde(default)]
    pub size: Option<u64>,
    /// Region for an unattached volume
    #[serde(default)]
    pub region: Option<String>,
    /// Instance to attach to; the volume is created in its region
    #[serde(default)]
    pub linode_id: Option<u64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ToolParams for VolumeCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("label", &self.label)?;
        if let Some(size) = self.size {
            require_positive("size", size)?;
        }
        if self.region.is_none() && self.linode_id.is_none() {
            return Err(ToolError::invalid(
                "region",
                "either region or linode_id is required",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct VolumeUpdateRequest {
    /// Volume ID
    pub volume_id: u64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ToolParams for VolumeUpdateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        if self.label.is_none() && self.tags.is_none() {
            return Err(ToolError::invalid(
                "volume_id",
                "nothing to update; pass label or tags",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct VolumeAttachRequest {
    /// Volume ID
    pub volume_id: u64,
    /// Instance to attach to (must be in the same region)
    pub linode_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct VolumeResizeRequest {
    /// Volume ID
    pub volume_id: u64,
    /// New size in GB. Volumes can only grow.
    pub size: u64,
}

impl ToolParams for VolumeResizeRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_positive("size", self.size)
    }
}

plain_params!(VolumeIdRequest, VolumeAttachRequest);
