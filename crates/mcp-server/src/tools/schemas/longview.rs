use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::plain_params;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LongviewClientIdRequest {
    /// Longview client ID
    pub client_id: u64,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct LongviewClientCreateRequest {
    /// Client label; generated when omitted
    #[serde(default)]
    pub label: Option<String>,
}

plain_params!(LongviewClientIdRequest, LongviewClientCreateRequest);
