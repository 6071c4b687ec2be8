//! Generic builder for a resource family's standard tools.
//!
//! Each family supplies one [`CrudSpec`] table; the builder instantiates
//! the uniform list/get/create/update/delete handlers from it. All five
//! share the same pipeline: validated arguments, endpoint path, query
//! string or JSON body, one HTTP call, summary plus payload envelope.

use reqwest::Method;
use serde_json::Value;

use crate::mcp::error::McpError;
use crate::registry::ToolRegistry;
use crate::schema::{FieldKind, ToolSchema};
use crate::wp::client::WpClient;
use crate::wp::query::{body_from_args, query_from_args, with_query};
use crate::wp::response::success;
use std::sync::Arc;

use super::{array_len, require_u64, wp_handler};

/// Renders the identifying-fields block of a create/update summary.
pub type Summary = fn(&Value) -> String;

pub struct CrudSpec {
    /// Remote collection path, e.g. `/posts`.
    pub base: &'static str,
    /// Singular noun used in tool names, e.g. `post`.
    pub noun: &'static str,
    /// Plural used in the list tool name.
    pub plural: &'static str,
    /// Plural used in "Found N ..." summaries (usually `plural`).
    pub count_label: &'static str,
    /// Capitalized label for summary headings, e.g. `Post`.
    pub label: &'static str,
    /// Override for the single-entity tool name (`get_{noun}` otherwise).
    pub get_tool: Option<&'static str>,
    /// Override for the single-entity summary label (`label` otherwise).
    pub get_label: Option<&'static str>,
    pub list_schema: ToolSchema,
    /// `None` for families whose creation is a special op (media upload).
    pub create_schema: Option<ToolSchema>,
    pub update_schema: ToolSchema,
    pub delete_schema: ToolSchema,
    pub create_summary: Summary,
    pub update_summary: Summary,
    /// Wording for a non-forced delete.
    pub trash_verb: &'static str,
}

/// Pull a display value out of a response payload: plain scalars render
/// directly, rendered-content objects render their `rendered` text.
pub fn display_field(data: &Value, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Object(obj)) => obj
            .get("rendered")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

pub fn register_crud(
    registry: &mut ToolRegistry,
    client: &Arc<WpClient>,
    spec: CrudSpec,
) -> Result<(), McpError> {
    let CrudSpec {
        base,
        noun,
        plural,
        count_label,
        label,
        get_tool,
        get_label,
        list_schema,
        create_schema,
        update_schema,
        delete_schema,
        create_summary,
        update_summary,
        trash_verb,
    } = spec;

    // List with filters.
    {
        let schema = list_schema.clone();
        registry.register(
            &format!("get_{}", plural),
            &format!("List {} with optional filters", plural),
            list_schema,
            wp_handler(client, move |client, args| {
                let schema = schema.clone();
                async move {
                    let query = query_from_args(&schema, &args);
                    let data = client.get(&with_query(base, &query)).await?;
                    let message = format!("Found {} {}", array_len(&data), count_label);
                    Ok(success(&data, Some(&message)))
                }
            }),
        )?;
    }

    // Get by id.
    {
        let name = get_tool.map(str::to_string).unwrap_or_else(|| format!("get_{}", noun));
        let single_label = get_label.unwrap_or(label);
        registry.register(
            &name,
            &format!("Get a single {} by ID", noun),
            ToolSchema::new().required("id", FieldKind::Integer, "Entity ID"),
            wp_handler(client, move |client, args| async move {
                let id = require_u64(&args, "id")?;
                let data = client.get(&format!("{}/{}", base, id)).await?;
                let message = format!("{} details for ID: {}", single_label, id);
                Ok(success(&data, Some(&message)))
            }),
        )?;
    }

    // Create.
    if let Some(create_schema) = create_schema {
        let schema = create_schema.clone();
        registry.register(
            &format!("create_{}", noun),
            &format!("Create a new {}", noun),
            create_schema,
            wp_handler(client, move |client, args| {
                let schema = schema.clone();
                async move {
                    let body = Value::Object(body_from_args(&schema, &args, &[]));
                    let data = client.send_json(Method::POST, base, &body).await?;
                    let message = format!(
                        "✅ {} created successfully!\n\n{}",
                        label,
                        create_summary(&data)
                    );
                    Ok(success(&data, Some(&message)))
                }
            }),
        )?;
    }

    // Update.
    {
        let schema = update_schema.clone();
        registry.register(
            &format!("update_{}", noun),
            &format!("Update an existing {}", noun),
            update_schema,
            wp_handler(client, move |client, args| {
                let schema = schema.clone();
                async move {
                    let id = require_u64(&args, "id")?;
                    let body = Value::Object(body_from_args(&schema, &args, &["id"]));
                    let data = client
                        .send_json(Method::POST, &format!("{}/{}", base, id), &body)
                        .await?;
                    let message = format!(
                        "✅ {} updated successfully!\n\n{}",
                        label,
                        update_summary(&data)
                    );
                    Ok(success(&data, Some(&message)))
                }
            }),
        )?;
    }

    // Delete. The summary wording is derived from the caller's `force`
    // flag, not the remote response shape.
    {
        let schema = delete_schema.clone();
        registry.register(
            &format!("delete_{}", noun),
            &format!("Delete a {}", noun),
            delete_schema,
            wp_handler(client, move |client, args| {
                let schema = schema.clone();
                async move {
                    let id = require_u64(&args, "id")?;
                    let force = args.get("force").and_then(Value::as_bool).unwrap_or(false);

                    let mut body = body_from_args(&schema, &args, &["id"]);
                    body.insert("force".to_string(), Value::Bool(force));

                    let data = client
                        .send_json(
                            Method::DELETE,
                            &format!("{}/{}", base, id),
                            &Value::Object(body),
                        )
                        .await?;
                    let message = format!(
                        "✅ {} {} successfully!",
                        label,
                        if force { "permanently deleted" } else { trash_verb }
                    );
                    Ok(success(&data, Some(&message)))
                }
            }),
        )?;
    }

    Ok(())
}
