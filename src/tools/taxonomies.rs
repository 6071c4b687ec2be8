//! Category and tag tools. The two families share the term-style CRUD
//! shape; categories additionally carry a parent.

use serde_json::Value;
use std::sync::Arc;

use crate::mcp::error::McpError;
use crate::registry::ToolRegistry;
use crate::schema::{FieldKind, ToolSchema};
use crate::wp::client::WpClient;

use super::resource::{display_field, register_crud, CrudSpec};

const ORDERBY: &[&str] = &[
    "id", "include", "name", "slug", "term_group", "description", "count",
];

fn term_summary(data: &Value) -> String {
    format!(
        "ID: {}\nName: {}\nSlug: {}",
        display_field(data, "id"),
        display_field(data, "name"),
        display_field(data, "slug")
    )
}

fn category_list_schema() -> ToolSchema {
    ToolSchema::new()
        .optional("per_page", FieldKind::Integer, "Results per page")
        .optional("page", FieldKind::Integer, "Page of results")
        .optional("search", FieldKind::String, "Limit results to those matching a term")
        .optional("order", FieldKind::Enum(&["asc", "desc"]), "Sort direction")
        .optional("orderby", FieldKind::Enum(ORDERBY), "Sort attribute")
        .optional("hide_empty", FieldKind::Boolean, "Hide terms not assigned to any post")
        .optional("parent", FieldKind::Integer, "Limit results to children of a category")
        .optional("post", FieldKind::Integer, "Limit results to terms of a post")
}

fn tag_list_schema() -> ToolSchema {
    ToolSchema::new()
        .optional("per_page", FieldKind::Integer, "Results per page")
        .optional("page", FieldKind::Integer, "Page of results")
        .optional("search", FieldKind::String, "Limit results to those matching a term")
        .optional("order", FieldKind::Enum(&["asc", "desc"]), "Sort direction")
        .optional("orderby", FieldKind::Enum(ORDERBY), "Sort attribute")
        .optional("hide_empty", FieldKind::Boolean, "Hide terms not assigned to any post")
        .optional("post", FieldKind::Integer, "Limit results to terms of a post")
}

fn delete_schema(noun: &'static str) -> ToolSchema {
    let description = match noun {
        "category" => "Category ID to delete",
        _ => "Tag ID to delete",
    };
    ToolSchema::new()
        .required("id", FieldKind::Integer, description)
        .optional("force", FieldKind::Boolean, "Permanently delete instead of trashing")
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<WpClient>) -> Result<(), McpError> {
    register_crud(
        registry,
        client,
        CrudSpec {
            base: "/categories",
            noun: "category",
            plural: "categories",
            count_label: "categories",
            label: "Category",
            get_tool: None,
            get_label: None,
            list_schema: category_list_schema(),
            create_schema: Some(
                ToolSchema::new()
                    .required("name", FieldKind::String, "Category name")
                    .optional("description", FieldKind::String, "Category description")
                    .optional("slug", FieldKind::String, "URL slug")
                    .optional("parent", FieldKind::Integer, "Parent category ID"),
            ),
            update_schema: ToolSchema::new()
                .required("id", FieldKind::Integer, "Category ID to update")
                .optional("name", FieldKind::String, "Category name")
                .optional("description", FieldKind::String, "Category description")
                .optional("slug", FieldKind::String, "URL slug")
                .optional("parent", FieldKind::Integer, "Parent category ID"),
            delete_schema: delete_schema("category"),
            create_summary: term_summary,
            update_summary: term_summary,
            trash_verb: "moved to trash",
        },
    )?;

    register_crud(
        registry,
        client,
        CrudSpec {
            base: "/tags",
            noun: "tag",
            plural: "tags",
            count_label: "tags",
            label: "Tag",
            get_tool: None,
            get_label: None,
            list_schema: tag_list_schema(),
            create_schema: Some(
                ToolSchema::new()
                    .required("name", FieldKind::String, "Tag name")
                    .optional("description", FieldKind::String, "Tag description")
                    .optional("slug", FieldKind::String, "URL slug"),
            ),
            update_schema: ToolSchema::new()
                .required("id", FieldKind::Integer, "Tag ID to update")
                .optional("name", FieldKind::String, "Tag name")
                .optional("description", FieldKind::String, "Tag description")
                .optional("slug", FieldKind::String, "URL slug"),
            delete_schema: delete_schema("tag"),
            create_summary: term_summary,
            update_summary: term_summary,
            trash_verb: "moved to trash",
        },
    )?;

    Ok(())
}
