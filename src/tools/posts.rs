//! Post tools: CRUD, revisions, and slug lookup.

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
];
const STATUS: &[&str] = &["publish", "future", "draft", "pending", "private"];
const OPEN_CLOSED: &[&str] = &["open", "closed"];

fn post_summary(data: &Value) -> String {
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
        .optional("status", FieldKind::String, "Limit results by post status")
        .optional("author", FieldKind::IntArray, "Limit results to specific author IDs")
        .optional("categories", FieldKind::IntArray, "Limit results to specific category IDs")
        .optional("tags", FieldKind::IntArray, "Limit results to specific tag IDs")
        .optional("order", FieldKind::Enum(&["asc", "desc"]), "Sort direction")
        .optional("orderby", FieldKind::Enum(ORDERBY), "Sort attribute")
        .optional("sticky", FieldKind::Boolean, "Limit results to sticky posts")
}

fn create_schema() -> ToolSchema {
    ToolSchema::new()
        .required("title", FieldKind::String, "The post title")
        .required("content", FieldKind::String, "The post content")
        .optional("excerpt", FieldKind::String, "The post excerpt")
        .optional("status", FieldKind::Enum(STATUS), "Publication status")
        .optional("slug", FieldKind::String, "URL slug")
        .optional("categories", FieldKind::IntArray, "Category IDs to assign")
        .optional("tags", FieldKind::IntArray, "Tag IDs to assign")
        .optional("featured_media", FieldKind::Integer, "Featured image media ID")
        .optional("comment_status", FieldKind::Enum(OPEN_CLOSED), "Whether comments are open")
        .optional("ping_status", FieldKind::Enum(OPEN_CLOSED), "Whether pings are open")
        .optional("sticky", FieldKind::Boolean, "Whether the post is sticky")
}

fn update_schema() -> ToolSchema {
    ToolSchema::new()
        .required("id", FieldKind::Integer, "Post ID to update")
        .optional("title", FieldKind::String, "The post title")
        .optional("content", FieldKind::String, "The post content")
        .optional("excerpt", FieldKind::String, "The post excerpt")
        .optional("status", FieldKind::Enum(STATUS), "Publication status")
        .optional("slug", FieldKind::String, "URL slug")
        .optional("categories", FieldKind::IntArray, "Category IDs to assign")
        .optional("tags", FieldKind::IntArray, "Tag IDs to assign")
        .optional("featured_media", FieldKind::Integer, "Featured image media ID")
        .optional("comment_status", FieldKind::Enum(OPEN_CLOSED), "Whether comments are open")
        .optional("ping_status", FieldKind::Enum(OPEN_CLOSED), "Whether pings are open")
        .optional("sticky", FieldKind::Boolean, "Whether the post is sticky")
}

fn delete_schema() -> ToolSchema {
    ToolSchema::new()
        .required("id", FieldKind::Integer, "Post ID to delete")
        .optional("force", FieldKind::Boolean, "Permanently delete instead of trashing")
}

fn revisions_schema() -> ToolSchema {
    ToolSchema::new()
        .required("post_id", FieldKind::Integer, "Parent post ID")
        .optional("page", FieldKind::Integer, "Page of results")
        .optional("per_page", FieldKind::Integer, "Results per page")
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<WpClient>) -> Result<(), McpError> {
    register_crud(
        registry,
        client,
        CrudSpec {
            base: "/posts",
            noun: "post",
            plural: "posts",
            count_label: "posts",
            label: "Post",
            get_tool: None,
            get_label: None,
            list_schema: list_schema(),
            create_schema: Some(create_schema()),
            update_schema: update_schema(),
            delete_schema: delete_schema(),
            create_summary: post_summary,
            update_summary: post_summary,
            trash_verb: "moved to trash",
        },
    )?;

    registry.register(
        "get_post_revisions",
        "List revisions of a post",
        revisions_schema(),
        wp_handler(client, |client, args| async move {
            let post_id = require_u64(&args, "post_id")?;
            let query = query_from_args_except(&revisions_schema(), &args, &["post_id"]);
            let endpoint = with_query(&format!("/posts/{}/revisions", post_id), &query);
            let data = client.get(&endpoint).await?;
            let message = format!("Found {} revisions for post {}", array_len(&data), post_id);
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "get_post_by_slug",
        "Look up a single post by its slug",
        ToolSchema::new()
            .required("slug", FieldKind::String, "Post slug")
            .optional("status", FieldKind::StringArray, "Statuses to search"),
        wp_handler(client, |client, args| async move {
            let slug = require_str(&args, "slug")?;
            let mut params = Params::new();
            params.push("slug", args.get("slug"));
            params.push("status", args.get("status"));

            let data = client.get(&with_query("/posts", &params)).await?;
            match data.as_array().and_then(|posts| posts.first()) {
                None => Ok(failure(&format!("No post found with slug: {}", slug))),
                Some(post) => {
                    let message = format!("Post found with slug: {}", slug);
                    Ok(success(post, Some(&message)))
                }
            }
        }),
    )?;

    Ok(())
}
