//! Page tools: CRUD, slug lookup, and child listing.

use serde_json::Value;
use std::sync::Arc;

use crate::mcp::error::McpError;
use crate::registry::ToolRegistry;
use crate::schema::{FieldKind, ToolSchema};
use crate::wp::client::WpClient;
use crate::wp::query::{query_from_args_except, with_query, Params};
use crate::wp::response::{failure, success};

use super::resource::{display_field, register_crud, CrudSpec};
use super::{array_len, require_str, require_u64, wp_handler};

const ORDERBY: &[&str] = &[
    "author", "date", "id", "include", "modified", "parent", "relevance", "slug", "title",
    "menu_order",
];
const STATUS: &[&str] = &["publish", "future", "draft", "pending", "private"];
const OPEN_CLOSED: &[&str] = &["open", "closed"];

fn page_summary(data: &Value) -> String {
    format!(
        "ID: {}\nTitle: {}\nStatus: {}",
        display_field(data, "id"),
        display_field(data, "title"),
        display_field(data, "status")
    )
}

fn list_schema() -> ToolSchema {
    ToolSchema::new()
        .optional("per_page", FieldKind::Integer, "Results per page")
        .optional("page", FieldKind::Integer, "Page of results")
        .optional("search", FieldKind::String, "Limit results to those matching a term")
        .optional("status", FieldKind::String, "Limit results by page status")
        .optional("author", FieldKind::IntArray, "Limit results to specific author IDs")
        .optional("parent", FieldKind::Integer, "Limit results to children of a page")
        .optional("order", FieldKind::Enum(&["asc", "desc"]), "Sort direction")
        .optional("orderby", FieldKind::Enum(ORDERBY), "Sort attribute")
        .optional("menu_order", FieldKind::Integer, "Limit results to a menu order")
}

fn create_schema() -> ToolSchema {
    ToolSchema::new()
        .required("title", FieldKind::String, "The page title")
        .required("content", FieldKind::String, "The page content")
        .optional("excerpt", FieldKind::String, "The page excerpt")
        .optional("status", FieldKind::Enum(STATUS), "Publication status")
        .optional("slug", FieldKind::String, "URL slug")
        .optional("parent", FieldKind::Integer, "Parent page ID")
        .optional("menu_order", FieldKind::Integer, "Order within menus")
        .optional("comment_status", FieldKind::Enum(OPEN_CLOSED), "Whether comments are open")
        .optional("ping_status", FieldKind::Enum(OPEN_CLOSED), "Whether pings are open")
        .optional("template", FieldKind::String, "Theme template file")
}

fn update_schema() -> ToolSchema {
    ToolSchema::new()
        .required("id", FieldKind::Integer, "Page ID to update")
        .optional("title", FieldKind::String, "The page title")
        .optional("content", FieldKind::String, "The page content")
        .optional("excerpt", FieldKind::String, "The page excerpt")
        .optional("status", FieldKind::Enum(STATUS), "Publication status")
        .optional("slug", FieldKind::String, "URL slug")
        .optional("parent", FieldKind::Integer, "Parent page ID")
        .optional("menu_order", FieldKind::Integer, "Order within menus")
        .optional("comment_status", FieldKind::Enum(OPEN_CLOSED), "Whether comments are open")
        .optional("ping_status", FieldKind::Enum(OPEN_CLOSED), "Whether pings are open")
        .optional("template", FieldKind::String, "Theme template file")
}

fn delete_schema() -> ToolSchema {
    ToolSchema::new()
        .required("id", FieldKind::Integer, "Page ID to delete")
        .optional("force", FieldKind::Boolean, "Permanently delete instead of trashing")
}

fn children_schema() -> ToolSchema {
    ToolSchema::new()
        .required("parent_id", FieldKind::Integer, "Parent page ID")
        .optional("per_page", FieldKind::Integer, "Results per page")
        .optional("order", FieldKind::Enum(&["asc", "desc"]), "Sort direction")
        .optional(
            "orderby",
            FieldKind::Enum(&["date", "id", "title", "menu_order"]),
            "Sort attribute",
        )
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<WpClient>) -> Result<(), McpError> {
    register_crud(
        registry,
        client,
        CrudSpec {
            base: "/pages",
            noun: "page",
            plural: "pages",
            count_label: "pages",
            label: "Page",
            get_tool: None,
            get_label: None,
            list_schema: list_schema(),
            create_schema: Some(create_schema()),
            update_schema: update_schema(),
            delete_schema: delete_schema(),
            create_summary: page_summary,
            update_summary: page_summary,
            trash_verb: "moved to trash",
        },
    )?;

    registry.register(
        "get_page_by_slug",
        "Look up a single page by its slug",
        ToolSchema::new()
            .required("slug", FieldKind::String, "Page slug")
            .optional("status", FieldKind::StringArray, "Statuses to search"),
        wp_handler(client, |client, args| async move {
            let slug = require_str(&args, "slug")?;
            let mut params = Params::new();
            params.push("slug", args.get("slug"));
            params.push("status", args.get("status"));

            let data = client.get(&with_query("/pages", &params)).await?;
            match data.as_array().and_then(|pages| pages.first()) {
                None => Ok(failure(&format!("No page found with slug: {}", slug))),
                Some(page) => {
                    let message = format!("Page found with slug: {}", slug);
                    Ok(success(page, Some(&message)))
                }
            }
        }),
    )?;

    registry.register(
        "get_page_children",
        "List the direct children of a page",
        children_schema(),
        wp_handler(client, |client, args| async move {
            let parent_id = require_u64(&args, "parent_id")?;
            // Caller-facing parent_id maps to the remote `parent` filter.
            let mut params = query_from_args_except(&children_schema(), &args, &["parent_id"]);
            params.append("parent", parent_id);

            let data = client.get(&with_query("/pages", &params)).await?;
            let message = format!(
                "Found {} child pages for parent {}",
                array_len(&data),
                parent_id
            );
            Ok(success(&data, Some(&message)))
        }),
    )?;

    Ok(())
}
