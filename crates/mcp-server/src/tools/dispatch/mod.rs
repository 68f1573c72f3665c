//! Tool registration and dispatch.
//!
//! Every tool is registered once at service construction with its name, description and typed
//! handler. The dispatcher owns argument parsing so that handlers only ever see validated
//! parameter structs.

mod context;
mod router;
mod service;

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use rmcp::ErrorData as McpError;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::params::{parse_arguments, schema_object, ParamDescriptor, ToolParams};
use super::ToolError;

pub use context::ToolContext;
pub use service::CloudMcpService;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("tool '{0}' is registered twice")]
    DuplicateTool(String),
}

type HandlerFn =
    dyn Fn(ToolContext, JsonObject) -> BoxFuture<'static, Result<String, ToolError>> + Send + Sync;

struct Route {
    tool: Tool,
    handler: Arc<HandlerFn>,
}

#[derive(Default)]
pub struct ToolDispatcher {
    routes: BTreeMap<String, Route>,
}

impl ToolDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P, F, Fut>(
        &mut self,
        name: &'static str,
        description: &'static str,
        handler: F,
    ) -> Result<(), DispatchError>
    where
        P: ToolParams,
        F: Fn(ToolContext, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        if self.routes.contains_key(name) {
            return Err(DispatchError::DuplicateTool(name.to_string()));
        }

        let schema = schema_object::<P>();
        let descriptor = Arc::new(ParamDescriptor::from_schema(&schema));
        let handler = Arc::new(handler);
        let erased: Arc<HandlerFn> = Arc::new(move |context, arguments| {
            let descriptor = descriptor.clone();
            let handler = handler.clone();
            async move {
                let params = parse_arguments::<P>(&arguments, &descriptor)?;
                handler(context, params).await
            }
            .boxed()
        });

        self.routes.insert(
            name.to_string(),
            Route {
                tool: Tool::new(name, description, Arc::new(schema)),
                handler: erased,
            },
        );
        Ok(())
    }

    /// Registered tools, sorted by name.
    pub fn tools(&self) -> Vec<Tool> {
        self.routes.values().map(|route| route.tool.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Run `name` with `arguments`, racing the handler against `cancel`.
    pub async fn dispatch(
        &self,
        name: &str,
        context: ToolContext,
        arguments: JsonObject,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let Some(route) = self.routes.get(name) else {
            log::debug!("Unknown tool requested: {name}");
            return ToolError::UnknownTool(name.to_string()).into_call_result();
        };

        log::debug!("Tool call: {name}");
        let call = (route.handler)(context, arguments);
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::info!("Tool call cancelled: {name}");
                return Err(McpError::internal_error(format!("tool '{name}' was cancelled"), None));
            }
            outcome = call => outcome,
        };

        match outcome {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(err) => {
                log::debug!("Tool {name} failed: {err}");
                err.into_call_result()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::params::plain_params;
    use rmcp::schemars;
    use serde::Deserialize;
    use serde_json::json;
    use std::time::Duration;

    #[derive(Debug, Deserialize, schemars::JsonSchema)]
    struct Echo {
        message: String,
    }

    #[derive(Debug, Deserialize, schemars::JsonSchema)]
    struct Nothing {}

    plain_params!(Echo, Nothing);

    fn text(result: &CallToolResult) -> String {
        result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    fn dispatcher() -> ToolDispatcher {
        let mut dispatcher = ToolDispatcher::new();
        dispatcher
            .register("zeta_echo", "Echo a message", |_ctx, p: Echo| async move {
                Ok(p.message)
            })
            .unwrap();
        dispatcher
            .register("alpha_sleep", "Sleep forever", |_ctx, _p: Nothing| async move {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            })
            .unwrap();
        dispatcher
    }

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut dispatcher = dispatcher();
        let err = dispatcher
            .register("zeta_echo", "again", |_ctx, p: Echo| async move { Ok(p.message) })
            .unwrap_err();
        assert_eq!(err, DispatchError::DuplicateTool("zeta_echo".into()));
    }

    #[test]
    fn tools_are_listed_sorted_with_schemas() {
        let tools = dispatcher().tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, vec!["alpha_sleep", "zeta_echo"]);
        let required = tools[1].input_schema.get("required").cloned();
        assert_eq!(required, Some(json!(["message"])));
    }

    #[tokio::test]
    async fn routes_to_handler_and_parses_arguments() {
        let dispatcher = dispatcher();
        let ctx = ToolContext::detached();

        let ok = dispatcher
            .dispatch("zeta_echo", ctx.clone(), args(json!({"message": "hi"})), CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(ok.is_error, Some(false));
        assert_eq!(text(&ok), "hi");

        let bad = dispatcher
            .dispatch("zeta_echo", ctx, args(json!({"message": 5})), CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(bad.is_error, Some(true));
        assert!(text(&bad).contains("'message'"));
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error_result() {
        let result = dispatcher()
            .dispatch("nope", ToolContext::detached(), JsonObject::new(), CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text(&result).contains("Unknown tool: nope"));
    }

    #[tokio::test]
    async fn cancellation_aborts_the_handler() {
        let dispatcher = dispatcher();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });
        let err = dispatcher
            .dispatch("alpha_sleep", ToolContext::detached(), JsonObject::new(), cancel)
            .await
            .unwrap_err();
        assert!(err.message.contains("cancelled"));
    }
}
