use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{require_non_empty, ToolParams};
use crate::tools::ToolError;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AccountSwitchRequest {
    /// Name of the configured account to make current
    pub account_name: String,
}

impl ToolParams for AccountSwitchRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("account_name", &self.account_name)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AccountAddRequest {
    /// Unique account name (letters, digits, '_' and '-')
    pub name: String,
    /// Linode API token. Verified against the API before the account is saved.
    pub token: String,
    /// Human-readable label shown in account listings
    pub label: String,
    /// API base URL override (default: https://api.linode.com/v4)
    #[serde(default)]
    pub apiurl: Option<String>,
}

impl ToolParams for AccountAddRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("token", &self.token)?;
        require_non_empty("label", &self.label)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AccountRemoveRequest {
    /// Account to remove. The default account cannot be removed.
    pub name: String,
}

impl ToolParams for AccountRemoveRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("name", &self.name)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AccountUpdateRequest {
    /// Account to update
    pub name: String,
    /// New API token (re-verified before saving)
    #[serde(default)]
    pub token: Option<String>,
    /// New label
    #[serde(default)]
    pub label: Option<String>,
    /// New API base URL; an empty string restores the default
    #[serde(default)]
    pub apiurl: Option<String>,
}

impl ToolParams for AccountUpdateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("name", &self.name)?;
        if self.token.is_none() && self.label.is_none() && self.apiurl.is_none() {
            return Err(ToolError::invalid(
                "name",
                "nothing to update; pass token, label or apiurl",
            ));
        }
        Ok(())
    }
}
