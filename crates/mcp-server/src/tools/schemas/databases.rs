use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{require_non_empty, require_one_of, ToolParams};
use crate::tools::ToolError;

pub const ENGINES: &[&str] = &["mysql", "postgresql"];

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DatabaseIdRequest {
    /// mysql or postgresql
    pub engine: String,
    /// Database ID
    pub database_id: u64,
}

impl ToolParams for DatabaseIdRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_one_of("engine", &self.engine, ENGINES)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DatabaseCreateRequest {
    /// Engine and version, e.g. "mysql/8.0.30" or "postgresql/16"
    pub engine: String,
    pub label: String,
    pub region: String,
    /// Plan ID, e.g. "g6-dedicated-2"
    #[serde(rename = "type")]
    pub plan: String,
    /// 1 or 3 nodes
    #[serde(default)]
    pub cluster_size: Option<u32>,
    /// CIDRs allowed to connect
    #[serde(default)]
    pub allow_list: Option<Vec<String>>,
}

impl DatabaseCreateRequest {
    /// `mysql` for "mysql/8.0.30".
    pub fn engine_family(&self) -> &str {
        self.engine.split('/').next().unwrap_or_default()
    }
}

impl ToolParams for DatabaseCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_one_of("engine", self.engine_family(), ENGINES)?;
        require_non_empty("label", &self.label)?;
        require_non_empty("region", &self.region)?;
        require_non_empty("type", &self.plan)?;
        if let Some(size) = self.cluster_size {
            if size != 1 && size != 3 {
                return Err(ToolError::invalid("cluster_size", "must be 1 or 3"));
            }
        }
        Ok(())
    }
}
