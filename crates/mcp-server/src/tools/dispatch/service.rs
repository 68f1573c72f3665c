use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use tokio_util::sync::CancellationToken;

use super::{router, DispatchError, ToolContext, ToolDispatcher};
use crate::accounts::AccountRegistry;

/// CloudMCP MCP service.
#[derive(Clone)]
pub struct CloudMcpService {
    dispatcher: Arc<ToolDispatcher>,
    context: ToolContext,
}

impl CloudMcpService {
    pub fn new(registry: Arc<AccountRegistry>) -> Result<Self, DispatchError> {
        let mut dispatcher = ToolDispatcher::new();
        router::register_all(&mut dispatcher)?;
        log::debug!("Registered {} tools", dispatcher.len());
        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            context: ToolContext::new(registry),
        })
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher.tools()
    }

    pub fn registry(&self) -> &AccountRegistry {
        self.context.registry()
    }

    /// Invoke a tool directly, outside an MCP session.
    pub async fn call(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, McpError> {
        self.dispatcher
            .dispatch(name, self.context.clone(), arguments, CancellationToken::new())
            .await
    }
}

impl ServerHandler for CloudMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("CloudMCP manages Linode infrastructure across multiple accounts. Use 'linode_account_list' to see configured accounts and 'linode_account_switch' to change the active one; every other tool runs against the current account.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.dispatcher.tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            self.dispatcher
                .dispatch(
                    &request.name,
                    self.context.clone(),
                    request.arguments.unwrap_or_default(),
                    context.ct,
                )
                .await
        }
    }
}
