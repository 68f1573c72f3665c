use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{require_non_empty, ToolParams};
use crate::tools::ToolError;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct RegionsListRequest {
    /// Only regions in this country (two-letter code, e.g. "us")
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RegionGetRequest {
    /// Region ID, e.g. "us-east"
    pub region_id: String,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct TypesListRequest {
    /// Only plans of this class (nanode, standard, dedicated, highmem, gpu, premium)
    #[serde(default)]
    pub class: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TypeGetRequest {
    /// Plan ID, e.g. "g6-standard-2"
    pub type_id: String,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct KernelsListRequest {
    /// Only kernels for this architecture (x86_64, i386)
    #[serde(default)]
    pub architecture: Option<String>,
    /// Include deprecated kernels (default: false)
    #[serde(default)]
    pub include_deprecated: Option<bool>,
}

crate::tools::params::plain_params!(RegionsListRequest, TypesListRequest, KernelsListRequest);

impl ToolParams for RegionGetRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("region_id", &self.region_id)
    }
}

impl ToolParams for TypeGetRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("type_id", &self.type_id)
    }
}
