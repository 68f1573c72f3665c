use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{plain_params, require_non_empty, ToolParams};
use crate::tools::ToolError;

const MAX_CONN_THROTTLE: u32 = 20;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NodeBalancerIdRequest {
    /// NodeBalancer ID
    pub nodebalancer_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NodeBalancerCreateRequest {
    /// Region to create the NodeBalancer in
    pub region: String,
    #[serde(default)]
    pub label: Option<String>,
    /// New connections per second allowed per client IP (0-20, 0 disables throttling)
    #[serde(default)]
    pub client_conn_throttle: Option<u32>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

fn check_throttle(value: Option<u32>) -> Result<(), ToolError> {
    match value {
        Some(v) if v > MAX_CONN_THROTTLE => Err(ToolError::invalid(
            "client_conn_throttle",
            format!("must be between 0 and {MAX_CONN_THROTTLE}"),
        )),
        _ => Ok(()),
    }
}

impl ToolParams for NodeBalancerCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("region", &self.region)?;
        check_throttle(self.client_conn_throttle)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NodeBalancerUpdateRequest {
    /// NodeBalancer ID
    pub nodebalancer_id: u64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub client_conn_throttle: Option<u32>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ToolParams for NodeBalancerUpdateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        check_throttle(self.client_conn_throttle)?;
        if self.label.is_none() && self.client_conn_throttle.is_none() && self.tags.is_none() {
            return Err(ToolError::invalid(
                "nodebalancer_id",
                "nothing to update; pass label, client_conn_throttle or tags",
            ));
        }
        Ok(())
    }
}

plain_params!(NodeBalancerIdRequest);
