use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::tools::{ToolInfo, ToolOutput, ToolRegistry};

const SERVER_NAME: &str = "repo-toolkit";

/// MCP server handler answering `tools/list` and `tools/call` from a [`ToolRegistry`].
#[derive(Clone)]
pub struct ToolboxHandler {
    registry: Arc<ToolRegistry>,
}

impl ToolboxHandler {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Registered tools as MCP tool definitions.
    pub fn tools(&self) -> Vec<McpTool> {
        self.registry
            .list_tools()
            .into_iter()
            .map(to_mcp_tool)
            .collect()
    }

    /// Run one tool. Unknown names are a protocol error; every other outcome,
    /// failures included, is the tool's envelope list.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let args = JsonValue::Object(arguments.unwrap_or_default());

        let output = self.registry.call(name, args).await.map_err(|e| {
            warn!("{}", e);
            McpError::invalid_params(e.to_string(), None)
        })?;

        envelope_result(&output)
    }
}

fn to_mcp_tool(info: ToolInfo) -> McpTool {
    let schema = match info.parameters {
        JsonValue::Object(schema) => schema,
        _ => JsonObject::new(),
    };
    McpTool::new(info.name, info.description, Arc::new(schema))
}

fn envelope_result(output: &ToolOutput) -> Result<CallToolResult, McpError> {
    let content = output
        .iter()
        .map(|envelope| serde_json::to_string(envelope).map(Content::text))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| McpError::internal_error(format!("Failed to encode tool reply: {e}"), None))?;

    Ok(CallToolResult::success(content))
}

impl ServerHandler for ToolboxHandler {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo {
            instructions: Some(
                "GitHub repository tools: list a user's public repositories, check repository ownership, and replace text in a file with a direct commit.".to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        };
        info.server_info.name = SERVER_NAME.to_string();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info
    }

    async fn list_tools(
        &self,
        _: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!("MCP call for {}", request.name);
        self.dispatch(&request.name, request.arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::ApiSettings;
    use crate::tools::{Envelope, ToolResponse};
    use serde_json::json;

    fn handler() -> ToolboxHandler {
        ToolboxHandler::new(ToolRegistry::with_defaults(ApiSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ApiSettings::default()
        }))
    }

    /// Decode the single envelope carried by a call result.
    fn envelope_of(result: &CallToolResult) -> Envelope {
        assert_eq!(result.content.len(), 1);
        let text = result.content[0]
            .as_text()
            .map(|t| t.text.clone())
            .expect("text content");
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_tools_carry_input_schemas() {
        let tools = handler().tools();
        let names: Vec<&str> = tools.iter().map(|t| &*t.name).collect();
        assert_eq!(
            names,
            vec![
                "code_replace_in_file",
                "fetch_all_public_repos_for_user",
                "is_repo_owned_by_user"
            ]
        );

        let replace = &tools[0];
        assert_eq!(replace.input_schema["type"], "object");
        assert!(
            replace.input_schema["required"]
                .as_array()
                .unwrap()
                .contains(&json!("search_text"))
        );
    }

    #[test]
    fn test_server_info_advertises_tools() {
        let info = handler().get_info();
        assert_eq!(info.server_info.name, "repo-toolkit");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_dispatch_returns_envelope_as_text() {
        let args = json!({"username": "", "repo_name": "tools"});
        let result = handler()
            .dispatch("is_repo_owned_by_user", args.as_object().cloned())
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        let envelope = envelope_of(&result);
        assert_eq!(envelope.kind, "json");
        assert_eq!(envelope.mime_type, "application/json");
        let response: ToolResponse = serde_json::from_value(envelope.payload().unwrap()).unwrap();
        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn test_missing_arguments_become_a_400_envelope() {
        let result = handler()
            .dispatch("fetch_all_public_repos_for_user", None)
            .await
            .unwrap();

        let response: ToolResponse =
            serde_json::from_value(envelope_of(&result).payload().unwrap()).unwrap();
        assert_eq!(response.status_code, 400);
        assert!(response.message.contains("Invalid arguments"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_protocol_error() {
        let err = handler().dispatch("delete_everything", None).await.unwrap_err();
        assert!(err.message.contains("Tool not found: delete_everything"));
    }
}
