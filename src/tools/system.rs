//! Site-level tools: settings, registered types and statuses, taxonomies,
//! block types, cross-content search, and site health.

use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

use crate::mcp::error::McpError;
use crate::registry::ToolRegistry;
use crate::schema::{FieldKind, ToolSchema};
use crate::wp::client::WpClient;
use crate::wp::query::{body_from_args, query_from_args, with_query};
use crate::wp::response::success;

use super::{array_len, object_len, require_str, wp_handler};

const OPEN_CLOSED: &[&str] = &["open", "closed"];
const SEARCH_TYPES: &[&str] = &["post", "page", "attachment"];

fn settings_schema() -> ToolSchema {
    ToolSchema::new()
        .optional("title", FieldKind::String, "Site title")
        .optional("description", FieldKind::String, "Site tagline")
        .optional("url", FieldKind::String, "Site URL")
        .optional("email", FieldKind::String, "Admin email address")
        .optional("timezone", FieldKind::String, "Site timezone")
        .optional("date_format", FieldKind::String, "Date format string")
        .optional("time_format", FieldKind::String, "Time format string")
        .optional("start_of_week", FieldKind::Integer, "First day of the week")
        .range(0, 6)
        .optional("language", FieldKind::String, "Site locale")
        .optional("use_smilies", FieldKind::Boolean, "Convert emoticons")
        .optional("default_category", FieldKind::Integer, "Default post category ID")
        .optional("default_post_format", FieldKind::String, "Default post format")
        .optional("posts_per_page", FieldKind::Integer, "Posts shown per page")
        .optional("default_ping_status", FieldKind::Enum(OPEN_CLOSED), "Default ping status")
        .optional("default_comment_status", FieldKind::Enum(OPEN_CLOSED), "Default comment status")
}

fn search_schema() -> ToolSchema {
    ToolSchema::new()
        .required("search", FieldKind::String, "Search term")
        .optional("type", FieldKind::EnumArray(SEARCH_TYPES), "Content types to search")
        .optional("subtype", FieldKind::StringArray, "Content subtypes to search")
        .optional("per_page", FieldKind::Integer, "Results per page")
        .optional("page", FieldKind::Integer, "Page of results")
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<WpClient>) -> Result<(), McpError> {
    registry.register(
        "get_settings",
        "Read the site settings",
        ToolSchema::new(),
        wp_handler(client, |client, _args| async move {
            let data = client.get("/settings").await?;
            Ok(success(&data, Some("WordPress settings retrieved")))
        }),
    )?;

    registry.register(
        "update_settings",
        "Update site settings",
        settings_schema(),
        wp_handler(client, |client, args| async move {
            let body = Value::Object(body_from_args(&settings_schema(), &args, &[]));
            let data = client.send_json(Method::POST, "/settings", &body).await?;
            Ok(success(
                &data,
                Some("✅ WordPress settings updated successfully!"),
            ))
        }),
    )?;

    registry.register(
        "get_post_types",
        "List the registered post types",
        ToolSchema::new(),
        wp_handler(client, |client, _args| async move {
            let data = client.get("/types").await?;
            let message = format!("Found {} post types", object_len(&data));
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "get_post_type",
        "Get a single registered post type",
        ToolSchema::new().required("type", FieldKind::String, "Post type slug"),
        wp_handler(client, |client, args| async move {
            let type_slug = require_str(&args, "type")?;
            let data = client.get(&format!("/types/{}", type_slug)).await?;
            let message = format!("Post type details for: {}", type_slug);
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "get_post_statuses",
        "List the registered post statuses",
        ToolSchema::new(),
        wp_handler(client, |client, _args| async move {
            let data = client.get("/statuses").await?;
            let message = format!("Found {} post statuses", object_len(&data));
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "get_post_status",
        "Get a single registered post status",
        ToolSchema::new().required("status", FieldKind::String, "Status slug"),
        wp_handler(client, |client, args| async move {
            let status = require_str(&args, "status")?;
            let data = client.get(&format!("/statuses/{}", status)).await?;
            let message = format!("Post status details for: {}", status);
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "get_taxonomies",
        "List the registered taxonomies",
        ToolSchema::new().optional("type", FieldKind::String, "Limit results to a post type"),
        wp_handler(client, |client, args| async move {
            let schema =
                ToolSchema::new().optional("type", FieldKind::String, "Limit results to a post type");
            let query = query_from_args(&schema, &args);
            let data = client.get(&with_query("/taxonomies", &query)).await?;
            let message = format!("Found {} taxonomies", object_len(&data));
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "get_taxonomy",
        "Get a single registered taxonomy",
        ToolSchema::new().required("taxonomy", FieldKind::String, "Taxonomy slug"),
        wp_handler(client, |client, args| async move {
            let taxonomy = require_str(&args, "taxonomy")?;
            let data = client.get(&format!("/taxonomies/{}", taxonomy)).await?;
            let message = format!("Taxonomy details for: {}", taxonomy);
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "get_block_types",
        "List the registered block types",
        ToolSchema::new().optional("namespace", FieldKind::String, "Limit results to a namespace"),
        wp_handler(client, |client, args| async move {
            let schema = ToolSchema::new().optional(
                "namespace",
                FieldKind::String,
                "Limit results to a namespace",
            );
            let query = query_from_args(&schema, &args);
            let data = client.get(&with_query("/block-types", &query)).await?;
            let message = format!("Found {} block types", array_len(&data));
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "get_block_type",
        "Get a single registered block type",
        ToolSchema::new()
            .required("namespace", FieldKind::String, "Block namespace")
            .required("name", FieldKind::String, "Block name"),
        wp_handler(client, |client, args| async move {
            let namespace = require_str(&args, "namespace")?;
            let name = require_str(&args, "name")?;
            let data = client
                .get(&format!("/block-types/{}/{}", namespace, name))
                .await?;
            let message = format!("Block type details for: {}/{}", namespace, name);
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "search_wordpress",
        "Search across site content",
        search_schema(),
        wp_handler(client, |client, args| async move {
            let term = require_str(&args, "search")?.to_string();
            let query = query_from_args(&search_schema(), &args);
            let data = client.get(&with_query("/search", &query)).await?;
            let message = format!(
                "Found {} search results for: \"{}\"",
                array_len(&data),
                term
            );
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "get_site_health",
        "Read the site health test results",
        ToolSchema::new(),
        wp_handler(client, |client, _args| async move {
            let data = client.get("/site-health/tests").await?;
            Ok(success(&data, Some("Site health information retrieved")))
        }),
    )?;

    Ok(())
}
