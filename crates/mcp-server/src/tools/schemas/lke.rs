use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{plain_params, require_non_empty, ToolParams};
use crate::tools::ToolError;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LkeClusterIdRequest {
    /// LKE cluster ID
    pub cluster_id: u64,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct NodePoolParam {
    /// Plan ID for every node in the pool
    #[serde(rename = "type")]
    pub plan: String,
    /// Number of nodes
    pub count: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LkeClusterCreateRequest {
    pub label: String,
    pub region: String,
    /// Kubernetes version, see linode_lke_versions_list
    pub k8s_version: String,
    /// At least one node pool
    pub node_pools: Vec<NodePoolParam>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ToolParams for LkeClusterCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("label", &self.label)?;
        require_non_empty("region", &self.region)?;
        require_non_empty("k8s_version", &self.k8s_version)?;
        if self.node_pools.is_empty() {
            return Err(ToolError::invalid("node_pools", "at least one node pool is required"));
        }
        for (i, pool) in self.node_pools.iter().enumerate() {
            require_non_empty(&format!("node_pools[{i}].type"), &pool.plan)?;
            if pool.count == 0 {
                return Err(ToolError::invalid(
                    format!("node_pools[{i}].count"),
                    "must be greater than zero",
                ));
            }
        }
        Ok(())
    }
}

plain_params!(LkeClusterIdRequest);
