use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{plain_params, require_non_empty, ToolParams};
use crate::tools::ToolError;

const MAX_SUMMARY_CHARS: usize = 64;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TicketIdRequest {
    /// Support ticket ID
    pub ticket_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TicketCreateRequest {
    /// One-line summary, at most 64 characters
    pub summary: String,
    pub description: String,
    /// Related resource; set at most one of the *_id fields
    #[serde(default)]
    pub linode_id: Option<u64>,
    #[serde(default)]
    pub volume_id: Option<u64>,
    #[serde(default)]
    pub domain_id: Option<u64>,
    #[serde(default)]
    pub nodebalancer_id: Option<u64>,
}

impl ToolParams for TicketCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("summary", &self.summary)?;
        require_non_empty("description", &self.description)?;
        if self.summary.chars().count() > MAX_SUMMARY_CHARS {
            return Err(ToolError::invalid(
                "summary",
                format!("must be at most {MAX_SUMMARY_CHARS} characters"),
            ));
        }
        let related = [
            self.linode_id,
            self.volume_id,
            self.domain_id,
            self.nodebalancer_id,
        ]
        .iter()
        .filter(|id| id.is_some())
        .count();
        if related > 1 {
            return Err(ToolError::invalid(
                "linode_id",
                "set at most one of linode_id, volume_id, domain_id, nodebalancer_id",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TicketReplyRequest {
    /// Support ticket ID
    pub ticket_id: u64,
    pub description: String,
}

impl ToolParams for TicketReplyRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("description", &self.description)
    }
}

plain_params!(TicketIdRequest);
