use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::mcp::error::McpError;
use crate::mcp::types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams};
use crate::registry::ToolRegistry;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Stdio JSON-RPC server exposing the tool registry to a single local
/// client. One line in, one response out; notifications get no response.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub async fn run_stdio(&self) -> Result<(), McpError> {
        info!(
            "MCP server running on stdio with {} tools",
            self.registry.len()
        );

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            if bytes_read == 0 {
                break; // EOF
            }

            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.process_line(&line).await else {
                continue;
            };

            let response_str = serde_json::to_string(&response)?;
            stdout.write_all(response_str.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        Ok(())
    }

    /// Returns `None` for notifications, which must not be answered.
    async fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line.trim()) {
            Ok(request) => request,
            Err(err) => {
                warn!("Discarding malformed request: {}", err);
                return Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError {
                        code: -32700,
                        message: format!("Parse error: {}", err),
                        data: None,
                    },
                ));
            }
        };

        if request.id.is_none() {
            return None;
        }

        Some(self.dispatch(request).await)
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        let result: Result<serde_json::Value, McpError> = match request.method.as_str() {
            "initialize" => Ok(self.initialize_result()),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => Ok(serde_json::json!({ "tools": self.registry.list_tools() })),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(McpError::MethodNotFound(other.to_string())),
        };

        match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => JsonRpcResponse::error(id, err.into()),
        }
    }

    async fn call_tool(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, McpError> {
        let params: ToolCallParams = serde_json::from_value(params.unwrap_or_default())?;
        let result = self.registry.call(&params.name, params.arguments).await?;
        Ok(serde_json::to_value(result)?)
    }

    fn initialize_result(&self) -> serde_json::Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ToolSchema;
    use crate::wp::response::success;
    use futures::FutureExt;
    use serde_json::json;

    fn server_with_one_tool() -> McpServer {
        let mut registry = ToolRegistry::new();
        registry
            .register(
                "hello",
                "Say hello",
                ToolSchema::new(),
                Box::new(|_args| async move { Ok(success(&json!("hi"), None)) }.boxed()),
            )
            .unwrap();
        McpServer::new(registry)
    }

    #[tokio::test]
    async fn initialize_reports_protocol_version() {
        let server = server_with_one_tool();
        let response = server
            .process_line(r#"{"jsonrpc":"2.0","method":"initialize","id":1}"#)
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], json!(PROTOCOL_VERSION));
    }

    #[tokio::test]
    async fn tools_list_returns_catalog() {
        let server = server_with_one_tool();
        let response = server
            .process_line(r#"{"jsonrpc":"2.0","method":"tools/list","id":2}"#)
            .await
            .unwrap();
        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools[0]["name"], json!("hello"));
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn tools_call_returns_envelope() {
        let server = server_with_one_tool();
        let response = server
            .process_line(
                r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"hello"},"id":3}"#,
            )
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["type"], json!("text"));
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let server = server_with_one_tool();
        let response = server
            .process_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn unknown_method_is_a_json_rpc_error() {
        let server = server_with_one_tool();
        let response = server
            .process_line(r#"{"jsonrpc":"2.0","method":"bogus/method","id":4}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }
}
