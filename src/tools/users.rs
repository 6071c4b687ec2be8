//! User tools: CRUD, the authenticated user, and application passwords.

use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

use crate::mcp::error::McpError;
use crate::registry::ToolRegistry;
use crate::schema::{FieldKind, ToolSchema};
use crate::wp::client::WpClient;
use crate::wp::response::success;

use super::resource::{display_field, register_crud, CrudSpec};
use super::{array_len, require_str, require_u64, wp_handler};

const ORDERBY: &[&str] = &[
    "id", "include", "name", "registered_date", "slug", "email", "url",
];

fn create_summary(data: &Value) -> String {
    format!(
        "ID: {}\nUsername: {}\nEmail: {}",
        display_field(data, "id"),
        display_field(data, "username"),
        display_field(data, "email")
    )
}

fn update_summary(data: &Value) -> String {
    format!(
        "ID: {}\nName: {}",
        display_field(data, "id"),
        display_field(data, "name")
    )
}

fn list_schema() -> ToolSchema {
    ToolSchema::new()
        .optional("per_page", FieldKind::Integer, "Results per page")
        .optional("page", FieldKind::Integer, "Page of results")
        .optional("search", FieldKind::String, "Limit results to those matching a term")
        .optional("order", FieldKind::Enum(&["asc", "desc"]), "Sort direction")
        .optional("orderby", FieldKind::Enum(ORDERBY), "Sort attribute")
        .optional("roles", FieldKind::StringArray, "Limit results to specific roles")
}

fn create_schema() -> ToolSchema {
    ToolSchema::new()
        .required("username", FieldKind::String, "Login name")
        .required("email", FieldKind::String, "Email address")
        .required("password", FieldKind::String, "Account password")
        .optional("name", FieldKind::String, "Display name")
        .optional("first_name", FieldKind::String, "First name")
        .optional("last_name", FieldKind::String, "Last name")
        .optional("url", FieldKind::String, "Profile URL")
        .optional("description", FieldKind::String, "Biographical info")
        .optional("nickname", FieldKind::String, "Nickname")
        .optional("slug", FieldKind::String, "URL slug")
        .optional("roles", FieldKind::StringArray, "Roles to assign")
}

fn update_schema() -> ToolSchema {
    ToolSchema::new()
        .required("id", FieldKind::Integer, "User ID to update")
        .optional("email", FieldKind::String, "Email address")
        .optional("name", FieldKind::String, "Display name")
        .optional("first_name", FieldKind::String, "First name")
        .optional("last_name", FieldKind::String, "Last name")
        .optional("url", FieldKind::String, "Profile URL")
        .optional("description", FieldKind::String, "Biographical info")
        .optional("nickname", FieldKind::String, "Nickname")
        .optional("slug", FieldKind::String, "URL slug")
        .optional("roles", FieldKind::StringArray, "Roles to assign")
        .optional("password", FieldKind::String, "Account password")
}

fn delete_schema() -> ToolSchema {
    ToolSchema::new()
        .required("id", FieldKind::Integer, "User ID to delete")
        .optional("force", FieldKind::Boolean, "Permanently delete the account")
        .optional("reassign", FieldKind::Integer, "User ID to reassign content to")
}

pub fn register(registry: &mut ToolRegistry, client: &Arc<WpClient>) -> Result<(), McpError> {
    register_crud(
        registry,
        client,
        CrudSpec {
            base: "/users",
            noun: "user",
            plural: "users",
            count_label: "users",
            label: "User",
            get_tool: None,
            get_label: None,
            list_schema: list_schema(),
            create_schema: Some(create_schema()),
            update_schema: update_schema(),
            delete_schema: delete_schema(),
            create_summary,
            update_summary,
            trash_verb: "deactivated",
        },
    )?;

    registry.register(
        "get_current_user",
        "Get the user the configured credentials belong to",
        ToolSchema::new(),
        wp_handler(client, |client, _args| async move {
            let data = client.get("/users/me").await?;
            Ok(success(&data, Some("Current user details")))
        }),
    )?;

    registry.register(
        "get_application_passwords",
        "List application passwords registered for a user",
        ToolSchema::new().required("user_id", FieldKind::Integer, "User ID"),
        wp_handler(client, |client, args| async move {
            let user_id = require_u64(&args, "user_id")?;
            let data = client
                .get(&format!("/users/{}/application-passwords", user_id))
                .await?;
            let message = format!(
                "Found {} application passwords for user {}",
                array_len(&data),
                user_id
            );
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "create_application_password",
        "Create an application password for a user",
        ToolSchema::new()
            .required("user_id", FieldKind::Integer, "User ID")
            .required("name", FieldKind::String, "Name identifying the password"),
        wp_handler(client, |client, args| async move {
            let user_id = require_u64(&args, "user_id")?;
            let name = require_str(&args, "name")?;

            let body = serde_json::json!({ "name": name });
            let data = client
                .send_json(
                    Method::POST,
                    &format!("/users/{}/application-passwords", user_id),
                    &body,
                )
                .await?;

            // The plaintext password is only ever returned by this call.
            let message = format!(
                "✅ Application password created successfully!\n\nName: {}\n⚠️  Save this password: {}\nIt will not be shown again!",
                name,
                display_field(&data, "password")
            );
            Ok(success(&data, Some(&message)))
        }),
    )?;

    registry.register(
        "delete_application_password",
        "Revoke one of a user's application passwords",
        ToolSchema::new()
            .required("user_id", FieldKind::Integer, "User ID")
            .required("uuid", FieldKind::String, "Application password UUID"),
        wp_handler(client, |client, args| async move {
            let user_id = require_u64(&args, "user_id")?;
            let uuid = require_str(&args, "uuid")?;

            let data = client
                .send(
                    Method::DELETE,
                    &format!("/users/{}/application-passwords/{}", user_id, uuid),
                )
                .await?;
            Ok(success(
                &data,
                Some("✅ Application password deleted successfully!"),
            ))
        }),
    )?;

    Ok(())
}
