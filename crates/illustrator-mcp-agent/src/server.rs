use crate::prompt;
use crate::utils::RunCodeArgs;
use illustrator_bridge::{Bridge, BridgeConfig, BridgeContent, BridgeResult};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{tool, tool_router, ErrorData as McpError, ServerHandler};
use std::sync::Arc;
use tracing::info;

/// MCP handler owning the bridge to the single target application.
#[derive(Clone)]
pub struct IllustratorAgent {
    bridge: Arc<Bridge>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl IllustratorAgent {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            bridge: Arc::new(Bridge::new(config)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "View a screenshot of the Adobe Illustrator window")]
    async fn view(&self) -> Result<CallToolResult, McpError> {
        Ok(into_call_tool_result(self.bridge.view().await))
    }

    #[tool(
        description = "Run ExtendScript code in Illustrator.\n\nDO NOT call `alert()` or `$.writeln()` for debugging.\n\nInstead, call `log(message)` each time you want to log a message. `log()` is already defined and passed to Illustrator along with the code you provide. All calls to `log()` are returned in the output."
    )]
    async fn run(
        &self,
        Parameters(args): Parameters<RunCodeArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(into_call_tool_result(self.bridge.run_code(&args.code).await))
    }
}

fn into_call_tool_result(result: BridgeResult) -> CallToolResult {
    let content = match result.content {
        BridgeContent::Text { text } => Content::text(text),
        BridgeContent::Image { data, mime_type } => Content::image(data, mime_type),
    };
    if result.is_error {
        CallToolResult::error(vec![content])
    } else {
        CallToolResult::success(vec![content])
    }
}

impl ServerHandler for IllustratorAgent {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(prompt::get_server_instructions()),
        }
    }

    async fn call_tool(
        &self,
        request: rmcp::model::CallToolRequestParam,
        context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        use rmcp::handler::server::tool::ToolCallContext;

        match request.name.as_ref() {
            "view" | "run" => {
                let tcc = ToolCallContext::new(self, request, context);
                self.tool_router.call(tcc).await
            }
            other => {
                // A bad tool name is a client error, not a protocol fault.
                info!(tool = %other, "rejecting unknown tool");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: Unknown tool '{other}'"
                ))]))
            }
        }
    }

    async fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<rmcp::model::ListToolsResult, McpError> {
        Ok(rmcp::model::ListToolsResult::with_all_items(
            self.tool_router.list_all(),
        ))
    }
}
