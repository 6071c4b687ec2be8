//! Comment tools: CRUD and per-post listing.

use serde_json::Value;
use std::sync::Arc;

use crate::mcp::error::McpError;
use crate::registry::ToolRegistry;
use crate::schema::{FieldKind, ToolSchema};
use crate::wp::client::WpClient;
use crate::wp::query::{query_from_args_except, with_query};
use crate::wp::response::success;

use super::resource::{display_field, register_crud, CrudSpec};
use super::{array_len, require_u64, wp_handler};

const ORDERBY: &[&str] = &["date", "date_gmt", "id", "include", "post", "parent", "type"];
const LIST_STATUS: &[&str] = &["hold", "approve", "all", "spam", "trash"];
const WRITE_STATUS: &[&str] = &["hold", "approve", "spam", "trash"];

fn create_summary(data: &Value) -> String {
    format!(
        "ID: {}\nPost: {}\nStatus: {}",
        display_field(data, "id"),
        display_field(data, "post"),
        display_field(data, "status")
    )
}

fn update_summary(data: &Value) -> String {
    format!(
        "ID: {}\nStatus: {}",
        display_field(data, "id"),
        display_field(data, "status")
    )
}

fn list_schema() -> ToolSchema {
    ToolSchema::new()
        .optional("per_page", FieldKind::Integer, "Results per page")
        .optional("page", FieldKind::Integer, "Page of results")
        .optional("search", FieldKind::String, "Limit results to those matching a term")
        .optional("order", FieldKind::Enum(&["asc", "desc"]), "Sort direction")
        .optional("orderby", FieldKind::Enum(ORDERBY), "Sort attribute")
        .optional("post", FieldKind::IntArray, "Limit results to specific post IDs")
        .optional("parent", FieldKind::Integer, "Limit results to replies to a comment")
        .optional("status", FieldKind::Enum(LIST_STATUS), "Limit results by status")
        .optional("type", FieldKind::String, "Limit results by comment type")
        .optional("author_email", FieldKind::String, "Limit results by author email")
}

fn create_schema() -> ToolSchema {
    ToolSchema::new()
        .required("post", FieldKind::Integer, "Post the comment belongs to")
        .required("content", FieldKind::String, "Comment text")
        .optional("parent", FieldKind::Integer, "Parent comment ID")
        .optional("author_name", FieldKind::String, "Author display name")
        .optional("author_email", FieldKind::String, "Author email address")
        .optional("author_url", FieldKind::String, "Author URL")
        .optional("status", FieldKind::Enum(WRITE_STATUS), "Moderation status")
}

fn update_schema() -> ToolSchema {
    ToolSchema::new()
        .required("id", FieldKind::Integer, "Comment ID to update")
        .optional("content", FieldKind::String, "Comment text")
        .optional("status", FieldKind::Enum(WRITE_STATUS), "Moderation status")
        .optional("author_name", FieldKind::String, "Author display name")
        .optional("author_email", FieldKind::String, "Author email address")
        .optional("author_url", FieldKind::String, "Author URL")
}

fn by_post_schema() -> ToolSchema {
    ToolSchema::new()
        .required("post_id", FieldKind::Integer, "Post ID")
        .optional("per_page", FieldKind::Integer, "Results per page")
        .optional("status", FieldKind::Enum(LIST_STATUS), "Limit results by status")
        .optional("order", FieldKind::Enum(&["asc", "desc"]), "Sort direction")
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<WpClient>) -> Result<(), McpError> {
    register_crud(
        registry,
        client,
        CrudSpec {
            base: "/comments",
            noun: "comment",
            plural: "comments",
            count_label: "comments",
            label: "Comment",
            get_tool: None,
            get_label: None,
            list_schema: list_schema(),
            create_schema: Some(create_schema()),
            update_schema: update_schema(),
            delete_schema: ToolSchema::new()
                .required("id", FieldKind::Integer, "Comment ID to delete")
                .optional("force", FieldKind::Boolean, "Permanently delete instead of trashing"),
            create_summary,
            update_summary,
            trash_verb: "moved to trash",
        },
    )?;

    registry.register(
        "get_comments_by_post",
        "List the comments on a post",
        by_post_schema(),
        wp_handler(client, |client, args| async move {
            let post_id = require_u64(&args, "post_id")?;
            // Caller-facing post_id maps to the remote `post` filter.
            let mut params = query_from_args_except(&by_post_schema(), &args, &["post_id"]);
            params.append("post", post_id);

            let data = client.get(&with_query("/comments", &params)).await?;
            let message = format!("Found {} comments for post {}", array_len(&data), post_id);
            Ok(success(&data, Some(&message)))
        }),
    )?;

    Ok(())
}
