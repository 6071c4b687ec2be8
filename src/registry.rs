//! Tool Registry
//!
//! A fixed catalog of named operations, each a (schema, handler) pair.
//! Registration happens once at startup and duplicate names are fatal.
//! `call` is the failure boundary: validation errors, transport errors,
//! and handler errors are all converted to an error envelope here and
//! nothing propagates past it.

use futures::future::BoxFuture;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::mcp::error::McpError;
use crate::mcp::types::Tool;
use crate::schema::{Arguments, ToolSchema};
use crate::wp::response::{failure, ToolResult};

/// A stored tool handler: validated arguments in, envelope or error out.
pub type HandlerFn =
    Box<dyn Fn(Arguments) -> BoxFuture<'static, Result<ToolResult, McpError>> + Send + Sync>;

struct RegisteredTool {
    description: String,
    schema: ToolSchema,
    handler: HandlerFn,
}

pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    /// Advertisement order follows registration order.
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(
        &mut self,
        name: &str,
        description: &str,
        schema: ToolSchema,
        handler: HandlerFn,
    ) -> Result<(), McpError> {
        if self.tools.contains_key(name) {
            return Err(McpError::InvalidRequest(format!(
                "tool '{}' is already registered",
                name
            )));
        }

        debug!("Registering tool: {}", name);
        self.order.push(name.to_string());
        self.tools.insert(
            name.to_string(),
            RegisteredTool {
                description: description.to_string(),
                schema,
                handler,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool descriptors for `tools/list`, in registration order.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.order
            .iter()
            .filter_map(|name| {
                self.tools.get(name).map(|tool| Tool {
                    name: name.clone(),
                    description: tool.description.clone(),
                    input_schema: tool.schema.to_json_schema(),
                })
            })
            .collect()
    }

    /// Invoke a tool. Returns `Err` only for an unknown name; every
    /// failure inside a known tool becomes an error envelope.
    pub async fn call(&self, name: &str, args: Option<Arguments>) -> Result<ToolResult, McpError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;

        info!("Calling tool: {}", name);
        let args = args.unwrap_or_default();

        if let Err(err) = tool.schema.validate(&args) {
            return Ok(failure(&err));
        }

        Ok(match (tool.handler)(args).await {
            Ok(result) => result,
            Err(err) => failure(&err),
        })
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;
    use crate::wp::response::success;
    use futures::FutureExt;
    use serde_json::json;

    fn echo_handler() -> HandlerFn {
        Box::new(|args| {
            async move { Ok(success(&serde_json::Value::Object(args), Some("ok"))) }.boxed()
        })
    }

    fn failing_handler() -> HandlerFn {
        Box::new(|_args| async move { Err(McpError::Api("remote said no".to_string())) }.boxed())
    }

    fn id_schema() -> ToolSchema {
        ToolSchema::new().required("id", FieldKind::Integer, "ID")
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = ToolRegistry::new();
        registry
            .register("get_post", "Get a post", id_schema(), echo_handler())
            .unwrap();
        let err = registry
            .register("get_post", "Get a post", id_schema(), echo_handler())
            .unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn tools_are_listed_in_registration_order() {
        let mut registry = ToolRegistry::new();
        registry
            .register("b_tool", "B", ToolSchema::new(), echo_handler())
            .unwrap();
        registry
            .register("a_tool", "A", ToolSchema::new(), echo_handler())
            .unwrap();

        let names: Vec<_> = registry.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["b_tool", "a_tool"]);
    }

    #[tokio::test]
    async fn validation_failure_becomes_error_envelope() {
        let mut registry = ToolRegistry::new();
        registry
            .register("get_post", "Get a post", id_schema(), echo_handler())
            .unwrap();

        let result = registry.call("get_post", None).await.unwrap();
        assert!(!result.is_success());
        assert!(result.text().contains("missing required field 'id'"));
    }

    #[tokio::test]
    async fn handler_failure_becomes_error_envelope() {
        let mut registry = ToolRegistry::new();
        registry
            .register("doomed", "Always fails", ToolSchema::new(), failing_handler())
            .unwrap();

        let result = registry.call("doomed", None).await.unwrap();
        assert_eq!(result.text(), "Error: remote said no");
    }

    #[tokio::test]
    async fn successful_call_returns_success_envelope() {
        let mut registry = ToolRegistry::new();
        registry
            .register("get_post", "Get a post", id_schema(), echo_handler())
            .unwrap();

        let args = json!({ "id": 5 }).as_object().cloned().unwrap();
        let result = registry.call("get_post", Some(args)).await.unwrap();
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn unknown_tool_is_a_lookup_error() {
        let registry = ToolRegistry::new();
        let err = registry.call("nope", None).await.unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound(_)));
    }
}
