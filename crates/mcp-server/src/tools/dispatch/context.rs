use std::sync::Arc;

use crate::accounts::{Account, AccountRegistry};
use crate::tools::ToolError;

/// Per-invocation handle passed to every handler.
#[derive(Clone)]
pub struct ToolContext {
    registry: Arc<AccountRegistry>,
}

impl ToolContext {
    pub fn new(registry: Arc<AccountRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    /// The current account, or a `NoCurrentAccount` error result.
    pub async fn account(&self) -> Result<Account, ToolError> {
        Ok(self.registry.current().await?)
    }

    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        Self::new(Arc::new(AccountRegistry::detached()))
    }
}
