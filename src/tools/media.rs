//! Media tools: library queries, metadata updates, and binary upload.

use base64::{engine::general_purpose, Engine as _};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::mcp::error::McpError;
use crate::registry::ToolRegistry;
use crate::schema::{FieldKind, ToolSchema};
use crate::wp::client::WpClient;
use crate::wp::query::{body_from_args, query_from_args_except, with_query};
use crate::wp::response::{failure, success};

use super::resource::{display_field, register_crud, CrudSpec};
use super::{array_len, require_str, require_u64, wp_handler};

const ORDERBY: &[&str] = &[
    "author", "date", "id", "include", "modified", "parent", "relevance", "slug", "title",
];
const MEDIA_TYPES: &[&str] = &["image", "video", "text", "application", "audio"];

fn media_summary(data: &Value) -> String {
    format!(
        "ID: {}\nTitle: {}",
        display_field(data, "id"),
        display_field(data, "title")
    )
}

fn list_schema() -> ToolSchema {
    ToolSchema::new()
        .optional("per_page", FieldKind::Integer, "Results per page")
        .optional("page", FieldKind::Integer, "Page of results")
        .optional("search", FieldKind::String, "Limit results to those matching a term")
        .optional("order", FieldKind::Enum(&["asc", "desc"]), "Sort direction")
        .optional("orderby", FieldKind::Enum(ORDERBY), "Sort attribute")
        .optional("parent", FieldKind::Integer, "Limit results to attachments of a post")
        .optional("media_type", FieldKind::Enum(MEDIA_TYPES), "Limit results by media type")
        .optional("mime_type", FieldKind::String, "Limit results by MIME type")
        .optional("author", FieldKind::IntArray, "Limit results to specific author IDs")
}

fn upload_schema() -> ToolSchema {
    ToolSchema::new()
        .required("filename", FieldKind::String, "Target filename")
        .required("content_base64", FieldKind::String, "File contents, base64-encoded")
        .optional("title", FieldKind::String, "Attachment title")
        .optional("alt_text", FieldKind::String, "Alternative text")
        .optional("caption", FieldKind::String, "Attachment caption")
        .optional("description", FieldKind::String, "Attachment description")
        .optional("post", FieldKind::Integer, "Post to attach the media to")
}

fn update_schema() -> ToolSchema {
    ToolSchema::new()
        .required("id", FieldKind::Integer, "Media ID to update")
        .optional("title", FieldKind::String, "Attachment title")
        .optional("alt_text", FieldKind::String, "Alternative text")
        .optional("caption", FieldKind::String, "Attachment caption")
        .optional("description", FieldKind::String, "Attachment description")
        .optional("post", FieldKind::Integer, "Post to attach the media to")
}

fn by_post_schema() -> ToolSchema {
    ToolSchema::new()
        .required("post_id", FieldKind::Integer, "Parent post ID")
        .optional("per_page", FieldKind::Integer, "Results per page")
        .optional("media_type", FieldKind::Enum(MEDIA_TYPES), "Limit results by media type")
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<WpClient>) -> Result<(), McpError> {
    register_crud(
        registry,
        client,
        CrudSpec {
            base: "/media",
            noun: "media",
            plural: "media",
            count_label: "media items",
            label: "Media",
            get_tool: Some("get_media_item"),
            get_label: Some("Media item"),
            list_schema: list_schema(),
            create_schema: None,
            update_schema: update_schema(),
            delete_schema: ToolSchema::new()
                .required("id", FieldKind::Integer, "Media ID to delete")
                .optional("force", FieldKind::Boolean, "Permanently delete instead of trashing"),
            create_summary: media_summary,
            update_summary: media_summary,
            trash_verb: "moved to trash",
        },
    )?;

    // Upload is the one two-step operation in the catalog: a binary POST
    // creates the attachment, then a second call applies any supplied
    // metadata. The two calls are sequential and independently observable;
    // a metadata failure after a successful upload leaves the attachment
    // in place with default metadata.
    registry.register(
        "upload_media",
        "Upload a file to the media library, with optional metadata",
        upload_schema(),
        wp_handler(client, |client, args| async move {
            let filename = require_str(&args, "filename")?.to_string();
            let content = require_str(&args, "content_base64")?;
            let bytes = general_purpose::STANDARD
                .decode(content)
                .map_err(|e| McpError::InvalidParams(format!("Invalid base64 data: {}", e)))?;

            let uploaded = client.post_bytes("/media", bytes, &filename).await?;

            let metadata = body_from_args(
                &upload_schema(),
                &args,
                &["filename", "content_base64"],
            );

            if metadata.is_empty() {
                let message = format!(
                    "✅ Media uploaded successfully!\n\nID: {}\nFilename: {}\nURL: {}",
                    display_field(&uploaded, "id"),
                    filename,
                    display_field(&uploaded, "source_url")
                );
                return Ok(success(&uploaded, Some(&message)));
            }

            let id = uploaded
                .get("id")
                .and_then(Value::as_u64)
                .ok_or_else(|| McpError::Api("upload response carried no id".to_string()))?;

            match client
                .send_json(
                    Method::POST,
                    &format!("/media/{}", id),
                    &Value::Object(metadata),
                )
                .await
            {
                Ok(updated) => {
                    let message = format!(
                        "✅ Media uploaded and updated successfully!\n\nID: {}\nFilename: {}\nURL: {}",
                        display_field(&updated, "id"),
                        filename,
                        display_field(&updated, "source_url")
                    );
                    Ok(success(&updated, Some(&message)))
                }
                Err(err) => {
                    warn!("Metadata update for media {} failed: {}", id, err);
                    Ok(failure(&format!(
                        "media {} was uploaded, but the metadata update failed: {}",
                        id, err
                    )))
                }
            }
        }),
    )?;

    registry.register(
        "get_media_by_post",
        "List media attached to a post",
        by_post_schema(),
        wp_handler(client, |client, args| async move {
            let post_id = require_u64(&args, "post_id")?;
            // Caller-facing post_id maps to the remote `parent` filter.
            let mut params = query_from_args_except(&by_post_schema(), &args, &["post_id"]);
            params.append("parent", post_id);

            let data = client.get(&with_query("/media", &params)).await?;
            let message = format!(
                "Found {} media items for post {}",
                array_len(&data),
                post_id
            );
            Ok(success(&data, Some(&message)))
        }),
    )?;

    Ok(())
}
