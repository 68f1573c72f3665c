use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{require_ip, require_one_of, ToolParams};
use crate::tools::ToolError;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IpAddressRequest {
    /// IPv4 or IPv6 address
    pub address: String,
}

impl ToolParams for IpAddressRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_ip("address", &self.address).map(|_| ())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IpUpdateRequest {
    /// IPv4 or IPv6 address
    pub address: String,
    /// Reverse DNS hostname; omit or pass an empty string to reset to the default
    #[serde(default)]
    pub rdns: Option<String>,
}

impl ToolParams for IpUpdateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_ip("address", &self.address).map(|_| ())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IpAllocateRequest {
    /// Instance that receives the address
    pub linode_id: u64,
    /// Address family; only "ipv4" can be allocated
    #[serde(rename = "type", default = "default_ip_kind")]
    pub kind: String,
    /// Public (true) or private (false) address
    pub public: bool,
}

fn default_ip_kind() -> String {
    "ipv4".to_string()
}

impl ToolParams for IpAllocateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_one_of("type", &self.kind, &["ipv4"])
    }
}
