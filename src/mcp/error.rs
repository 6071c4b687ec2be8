use crate::mcp::types::JsonRpcError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum McpError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Failure reported by the WordPress API. Displays as the bare remote
    /// message so the error envelope reads `Error: <message>`.
    #[error("{0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<McpError> for JsonRpcError {
    fn from(err: McpError) -> Self {
        match err {
            McpError::MethodNotFound(msg) => JsonRpcError {
                code: -32601,
                message: format!("Method not found: {}", msg),
                data: None,
            },
            McpError::InvalidParams(msg) => JsonRpcError {
                code: -32602,
                message: format!("Invalid params: {}", msg),
                data: None,
            },
            McpError::ToolNotFound(msg) => JsonRpcError {
                code: -32602,
                message: format!("Tool not found: {}", msg),
                data: None,
            },
            _ => JsonRpcError {
                code: -32603,
                message: err.to_string(),
                data: None,
            },
        }
    }
}
