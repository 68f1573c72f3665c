use cloudmcp_linode::ApiError;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use thiserror::Error;

use crate::accounts::AccountError;

/// Failures a tool reports to the caller. Everything except `Framework` becomes an MCP error
/// *result* (`is_error = true`); `Framework` is a protocol-level error.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("No current account available from the account manager: {0}")]
    NoCurrentAccount(String),

    #[error("Account '{0}' already exists")]
    NameConflict(String),

    #[error("Account '{0}' not found")]
    NotFound(String),

    #[error("Cannot remove the default account '{0}'")]
    CannotRemoveDefault(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Failed to {action}: {message}")]
    Upstream { action: String, message: String },

    #[error("Internal error: {0}")]
    Framework(String),
}

impl ToolError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wrap an upstream failure; `action` reads as "Failed to <action>".
    pub fn upstream(action: impl Into<String>, err: ApiError) -> Self {
        Self::Upstream {
            action: action.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn into_call_result(self) -> Result<CallToolResult, McpError> {
        match self {
            Self::Framework(message) => Err(McpError::internal_error(message, None)),
            other => Ok(CallToolResult::error(vec![Content::text(format!(
                "Error: {other}"
            ))])),
        }
    }
}

impl From<AccountError> for ToolError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidArgument(message) => Self::invalid("account", message),
            AccountError::NameConflict(name) => Self::NameConflict(name),
            AccountError::NotFound(name) => Self::NotFound(name),
            AccountError::CannotRemoveDefault(name) => Self::CannotRemoveDefault(name),
            AccountError::NoCurrentAccount => {
                Self::NoCurrentAccount("no account is selected or configured".into())
            }
            AccountError::Auth { .. } => Self::AuthError(err.to_string()),
            AccountError::Upstream { .. } | AccountError::Client(_) => Self::Upstream {
                action: "verify account".into(),
                message: err.to_string(),
            },
            AccountError::Contended(_) => Self::Upstream {
                action: "update account".into(),
                message: err.to_string(),
            },
            AccountError::Persist(_) => Self::Upstream {
                action: "persist configuration".into(),
                message: err.to_string(),
            },
        }
    }
}
