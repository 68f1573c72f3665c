use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{plain_params, require_non_empty, ToolParams};
use crate::tools::ToolError;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct StackScriptsListRequest {
    /// Only StackScripts owned by this account (default: true)
    #[serde(default)]
    pub mine: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StackScriptIdRequest {
    /// StackScript ID
    pub stackscript_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StackScriptCreateRequest {
    pub label: String,
    /// Images this script can deploy to, e.g. ["linode/debian12"]
    pub images: Vec<String>,
    /// Script body; must start with a shebang line
    pub script: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    /// Note for this revision
    #[serde(default)]
    pub rev_note: Option<String>,
}

impl ToolParams for StackScriptCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("label", &self.label)?;
        if self.images.is_empty() {
            return Err(ToolError::invalid("images", "must name at least one image"));
        }
        if !self.script.starts_with("#!") {
            return Err(ToolError::invalid("script", "must start with a shebang line"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StackScriptUpdateRequest {
    /// StackScript ID
    pub stackscript_id: u64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub rev_note: Option<String>,
}

impl ToolParams for StackScriptUpdateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        if let Some(script) = &self.script {
            if !script.starts_with("#!") {
                return Err(ToolError::invalid("script", "must start with a shebang line"));
            }
        }
        if self.label.is_none()
            && self.images.is_none()
            && self.script.is_none()
            && self.description.is_none()
            && self.is_public.is_none()
        {
            return Err(ToolError::invalid("stackscript_id", "nothing to update"));
        }
        Ok(())
    }
}

plain_params!(StackScriptsListRequest, StackScriptIdRequest);
