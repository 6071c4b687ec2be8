//! The tool catalog: one module per resource family.
//!
//! Standard get/list/create/update/delete tools are instantiated through
//! the generic builder in [`resource`]; lookups and sub-resource
//! operations that fall outside that pattern are registered directly in
//! their family module.

pub mod comments;
pub mod media;
pub mod pages;
pub mod posts;
pub mod resource;
pub mod system;
pub mod taxonomies;
pub mod users;

use futures::FutureExt;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

use crate::mcp::error::McpError;
use crate::registry::{HandlerFn, ToolRegistry};
use crate::schema::Arguments;
use crate::wp::client::WpClient;
use crate::wp::response::ToolResult;

/// Register the complete catalog. A duplicate name anywhere is an error
/// and aborts startup.
pub fn register_all(registry: &mut ToolRegistry, client: Arc<WpClient>) -> Result<(), McpError> {
    posts::register(registry, &client)?;
    pages::register(registry, &client)?;
    taxonomies::register(registry, &client)?;
    media::register(registry, &client)?;
    users::register(registry, &client)?;
    comments::register(registry, &client)?;
    system::register(registry, &client)?;
    Ok(())
}

/// Adapt an async closure over the shared client into a stored handler.
pub(crate) fn wp_handler<F, Fut>(client: &Arc<WpClient>, f: F) -> HandlerFn
where
    F: Fn(Arc<WpClient>, Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ToolResult, McpError>> + Send + 'static,
{
    let client = client.clone();
    Box::new(move |args| f(client.clone(), args).boxed())
}

pub(crate) fn require_u64(args: &Arguments, key: &str) -> Result<u64, McpError> {
    args.get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| McpError::InvalidParams(format!("Missing {}", key)))
}

pub(crate) fn require_str<'a>(args: &'a Arguments, key: &str) -> Result<&'a str, McpError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| McpError::InvalidParams(format!("Missing {}", key)))
}

/// Element count of a list payload, for "Found N ..." summaries.
pub(crate) fn array_len(data: &Value) -> usize {
    data.as_array().map(Vec::len).unwrap_or_default()
}

/// Key count of a keyed-object payload (post types, taxonomies, ...).
pub(crate) fn object_len(data: &Value) -> usize {
    data.as_object().map(serde_json::Map::len).unwrap_or_default()
}
