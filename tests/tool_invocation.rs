//! End-to-end tool invocations against a mock WordPress server.
//!
//! Every test drives a fully registered catalog through the registry's
//! public call path, the same route a `tools/call` request takes.

use base64::{engine::general_purpose, Engine as _};
use httpmock::Method::{DELETE, GET, POST};
use httpmock::MockServer;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use wp_mcp::tools::register_all;
use wp_mcp::wp::response::ToolResult;
use wp_mcp::{ToolRegistry, WpClient, WpConfig};

fn registry_for(server: &MockServer, username: &str, password: &str) -> ToolRegistry {
    let config = WpConfig {
        base_url: server.base_url(),
        username: username.to_string(),
        app_password: password.to_string(),
        timeout_seconds: Some(5),
    };
    let client = Arc::new(WpClient::new(&config).expect("client should build"));
    let mut registry = ToolRegistry::new();
    register_all(&mut registry, client).expect("catalog should register");
    registry
}

async fn call(registry: &ToolRegistry, name: &str, args: serde_json::Value) -> ToolResult {
    registry
        .call(name, args.as_object().cloned())
        .await
        .expect("tool should exist")
}

#[test]
fn full_catalog_registers_without_collisions() {
    let server = MockServer::start();
    let registry = registry_for(&server, "", "");
    assert_eq!(registry.len(), 57);

    let tools = registry.list_tools();
    assert_eq!(tools[0].name, "get_posts");
    assert!(tools.iter().all(|tool| tool.input_schema.is_object()));
}

#[tokio::test]
async fn create_post_sends_only_supplied_fields() {
    let server = MockServer::start();
    // Exact body match: no status key may appear when the caller omits it.
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/wp-json/wp/v2/posts")
            .json_body(json!({ "title": "Hello", "content": "World" }));
        then.status(201).json_body(json!({
            "id": 42,
            "title": { "rendered": "Hello" },
            "status": "draft"
        }));
    });

    let registry = registry_for(&server, "", "");
    let result = call(
        &registry,
        "create_post",
        json!({ "title": "Hello", "content": "World" }),
    )
    .await;

    mock.assert();
    assert!(result.is_success());
    assert!(result.text().contains("ID: 42"));
    assert!(result.text().contains("Title: Hello"));
    assert!(result.text().contains("Status: draft"));
}

#[tokio::test]
async fn list_filters_land_in_the_query_string() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/wp-json/wp/v2/posts")
            .query_param("per_page", "5")
            .query_param("author", "3")
            .query_param("author", "1")
            .query_param("sticky", "true");
        then.status(200).json_body(json!([{ "id": 1 }, { "id": 2 }]));
    });

    let registry = registry_for(&server, "", "");
    let result = call(
        &registry,
        "get_posts",
        json!({ "per_page": 5, "author": [3, 1], "sticky": true }),
    )
    .await;

    mock.assert();
    assert!(result.is_success());
    assert!(result.text().starts_with("Found 2 posts"));
}

#[tokio::test]
async fn configured_credentials_produce_a_basic_auth_header() {
    let server = MockServer::start();
    let expected = format!("Basic {}", general_purpose::STANDARD.encode("admin:secret"));
    let mock = server.mock(move |when, then| {
        when.method(GET)
            .path("/wp-json/wp/v2/posts")
            .header("authorization", expected.as_str());
        then.status(200).json_body(json!([]));
    });

    let registry = registry_for(&server, "admin", "secret");
    let result = call(&registry, "get_posts", json!({})).await;

    mock.assert();
    assert!(result.is_success());
}

#[tokio::test]
async fn missing_credentials_send_no_authorization_header() {
    let server = MockServer::start();
    let authed = server.mock(|when, then| {
        when.method(GET)
            .path("/wp-json/wp/v2/posts")
            .header_exists("authorization");
        then.status(200).json_body(json!([]));
    });
    let anonymous = server.mock(|when, then| {
        when.method(GET).path("/wp-json/wp/v2/posts");
        then.status(200).json_body(json!([]));
    });

    let registry = registry_for(&server, "", "");
    let result = call(&registry, "get_posts", json!({})).await;

    assert!(result.is_success());
    assert_eq!(authed.hits(), 0);
    assert_eq!(anonymous.hits(), 1);
}

#[tokio::test]
async fn remote_error_message_is_rendered_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/wp-json/wp/v2/posts");
        then.status(400)
            .json_body(json!({ "code": "rest_invalid_param", "message": "Invalid parameter" }));
    });

    let registry = registry_for(&server, "", "");
    let result = call(&registry, "get_posts", json!({})).await;

    assert!(!result.is_success());
    assert_eq!(result.text(), "Error: Invalid parameter");
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_the_status_line() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/wp-json/wp/v2/posts/9");
        then.status(502).body("<html>upstream sad</html>");
    });

    let registry = registry_for(&server, "", "");
    let result = call(&registry, "get_post", json!({ "id": 9 })).await;

    assert!(!result.is_success());
    assert_eq!(result.text(), "Error: 502 Bad Gateway");
}

#[tokio::test]
async fn validation_failures_never_reach_the_network() {
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.path_contains("/wp-json");
        then.status(200).json_body(json!([]));
    });

    let registry = registry_for(&server, "", "");

    let missing = call(&registry, "create_post", json!({ "title": "no content" })).await;
    assert!(!missing.is_success());
    assert!(missing.text().contains("missing required field 'content'"));

    let bad_enum = call(
        &registry,
        "get_posts",
        json!({ "order": "sideways" }),
    )
    .await;
    assert!(!bad_enum.is_success());

    let unknown = call(&registry, "get_posts", json!({ "bogus": 1 })).await;
    assert!(!unknown.is_success());
    assert!(unknown.text().contains("unknown field 'bogus'"));

    assert_eq!(any_request.hits(), 0);
}

#[tokio::test]
async fn slug_lookup_with_no_match_is_an_error_naming_the_slug() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/wp-json/wp/v2/posts")
            .query_param("slug", "missing-post");
        then.status(200).json_body(json!([]));
    });

    let registry = registry_for(&server, "", "");
    let result = call(&registry, "get_post_by_slug", json!({ "slug": "missing-post" })).await;

    assert!(!result.is_success());
    assert_eq!(result.text(), "Error: No post found with slug: missing-post");
}

#[tokio::test]
async fn slug_lookup_returns_only_the_first_match()  {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/wp-json/wp/v2/posts")
            .query_param("slug", "hello-world");
        then.status(200).json_body(json!([
            { "id": 10, "slug": "hello-world" },
            { "id": 11, "slug": "hello-world" }
        ]));
    });

    let registry = registry_for(&server, "", "");
    let result = call(&registry, "get_post_by_slug", json!({ "slug": "hello-world" })).await;

    assert!(result.is_success());
    assert!(result.text().contains("Post found with slug: hello-world"));
    assert!(result.text().contains("\"id\": 10"));
    assert!(!result.text().contains("\"id\": 11"));
}

#[tokio::test]
async fn delete_wording_tracks_the_force_flag() {
    let server = MockServer::start();
    let forced = server.mock(|when, then| {
        when.method(DELETE)
            .path("/wp-json/wp/v2/posts/10")
            .json_body(json!({ "force": true }));
        then.status(200).json_body(json!({ "deleted": true }));
    });
    let trashed = server.mock(|when, then| {
        when.method(DELETE)
            .path("/wp-json/wp/v2/posts/11")
            .json_body(json!({ "force": false }));
        then.status(200).json_body(json!({ "id": 11, "status": "trash" }));
    });

    let registry = registry_for(&server, "", "");

    let result = call(&registry, "delete_post", json!({ "id": 10, "force": true })).await;
    assert!(result.text().contains("permanently deleted"));

    let result = call(&registry, "delete_post", json!({ "id": 11 })).await;
    assert!(result.text().contains("moved to trash"));

    forced.assert();
    trashed.assert();
}

#[tokio::test]
async fn delete_user_reassigns_and_deactivates() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/wp-json/wp/v2/users/5")
            .json_body(json!({ "reassign": 2, "force": false }));
        then.status(200).json_body(json!({ "id": 5 }));
    });

    let registry = registry_for(&server, "", "");
    let result = call(&registry, "delete_user", json!({ "id": 5, "reassign": 2 })).await;

    mock.assert();
    assert!(result.text().contains("deactivated"));
}

#[tokio::test]
async fn upload_with_metadata_issues_two_sequential_calls() {
    let server = MockServer::start();
    let upload = server.mock(|when, then| {
        when.method(POST)
            .path("/wp-json/wp/v2/media")
            .header("content-type", "application/octet-stream")
            .header("content-disposition", "attachment; filename=\"photo.jpg\"")
            .body("hello");
        then.status(201).json_body(json!({
            "id": 7,
            "source_url": "http://example.test/photo.jpg"
        }));
    });
    let update = server.mock(|when, then| {
        when.method(POST)
            .path("/wp-json/wp/v2/media/7")
            .json_body(json!({ "title": "My Photo" }));
        then.status(200).json_body(json!({
            "id": 7,
            "title": { "rendered": "My Photo" },
            "source_url": "http://example.test/photo.jpg"
        }));
    });

    let registry = registry_for(&server, "", "");
    let result = call(
        &registry,
        "upload_media",
        json!({
            "filename": "photo.jpg",
            "content_base64": general_purpose::STANDARD.encode("hello"),
            "title": "My Photo"
        }),
    )
    .await;

    upload.assert();
    update.assert();
    assert!(result.is_success());
    assert!(result.text().contains("uploaded and updated"));
    assert!(result.text().contains("ID: 7"));
}

#[tokio::test]
async fn upload_without_metadata_is_a_single_call() {
    let server = MockServer::start();
    let upload = server.mock(|when, then| {
        when.method(POST).path("/wp-json/wp/v2/media");
        then.status(201).json_body(json!({
            "id": 8,
            "source_url": "http://example.test/raw.bin"
        }));
    });
    let update = server.mock(|when, then| {
        when.method(POST).path("/wp-json/wp/v2/media/8");
        then.status(200).json_body(json!({ "id": 8 }));
    });

    let registry = registry_for(&server, "", "");
    let result = call(
        &registry,
        "upload_media",
        json!({
            "filename": "raw.bin",
            "content_base64": general_purpose::STANDARD.encode("data")
        }),
    )
    .await;

    assert!(result.is_success());
    assert_eq!(upload.hits(), 1);
    assert_eq!(update.hits(), 0);
}

#[tokio::test]
async fn metadata_failure_after_upload_names_the_created_media() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/wp-json/wp/v2/media");
        then.status(201).json_body(json!({ "id": 9 }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/wp-json/wp/v2/media/9");
        then.status(500)
            .json_body(json!({ "message": "Could not update attachment" }));
    });

    let registry = registry_for(&server, "", "");
    let result = call(
        &registry,
        "upload_media",
        json!({
            "filename": "photo.jpg",
            "content_base64": general_purpose::STANDARD.encode("hello"),
            "alt_text": "A photo"
        }),
    )
    .await;

    assert!(!result.is_success());
    assert!(result.text().contains("media 9 was uploaded"));
    assert!(result.text().contains("Could not update attachment"));
}

#[tokio::test]
async fn by_post_lookups_rename_the_filter_key() {
    let server = MockServer::start();
    let media = server.mock(|when, then| {
        when.method(GET)
            .path("/wp-json/wp/v2/media")
            .query_param("parent", "3")
            .query_param("per_page", "2");
        then.status(200).json_body(json!([{ "id": 30 }]));
    });
    let comments = server.mock(|when, then| {
        when.method(GET)
            .path("/wp-json/wp/v2/comments")
            .query_param("post", "3");
        then.status(200).json_body(json!([{ "id": 40 }, { "id": 41 }]));
    });

    let registry = registry_for(&server, "", "");

    let result = call(
        &registry,
        "get_media_by_post",
        json!({ "post_id": 3, "per_page": 2 }),
    )
    .await;
    assert!(result.text().starts_with("Found 1 media items for post 3"));

    let result = call(&registry, "get_comments_by_post", json!({ "post_id": 3 })).await;
    assert!(result.text().starts_with("Found 2 comments for post 3"));

    media.assert();
    comments.assert();
}

#[tokio::test]
async fn page_children_filter_by_parent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/wp-json/wp/v2/pages")
            .query_param("parent", "12");
        then.status(200).json_body(json!([{ "id": 13 }, { "id": 14 }, { "id": 15 }]));
    });

    let registry = registry_for(&server, "", "");
    let result = call(&registry, "get_page_children", json!({ "parent_id": 12 })).await;

    mock.assert();
    assert!(result.text().starts_with("Found 3 child pages for parent 12"));
}

#[tokio::test]
async fn revisions_use_the_sub_resource_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/wp-json/wp/v2/posts/6/revisions");
        then.status(200).json_body(json!([{ "id": 61 }]));
    });

    let registry = registry_for(&server, "", "");
    let result = call(&registry, "get_post_revisions", json!({ "post_id": 6 })).await;

    mock.assert();
    assert!(result.text().starts_with("Found 1 revisions for post 6"));
}

#[tokio::test]
async fn keyed_object_payloads_count_their_entries() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/wp-json/wp/v2/types");
        then.status(200).json_body(json!({
            "post": { "slug": "post" },
            "page": { "slug": "page" },
            "attachment": { "slug": "attachment" }
        }));
    });

    let registry = registry_for(&server, "", "");
    let result = call(&registry, "get_post_types", json!({})).await;

    assert!(result.text().starts_with("Found 3 post types"));
}

#[tokio::test]
async fn application_password_creation_warns_about_the_secret() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/wp-json/wp/v2/users/5/application-passwords")
            .json_body(json!({ "name": "automation" }));
        then.status(201).json_body(json!({
            "uuid": "a-b-c",
            "name": "automation",
            "password": "abcd efgh ijkl"
        }));
    });

    let registry = registry_for(&server, "", "");
    let result = call(
        &registry,
        "create_application_password",
        json!({ "user_id": 5, "name": "automation" }),
    )
    .await;

    mock.assert();
    assert!(result.is_success());
    assert!(result.text().contains("Save this password: abcd efgh ijkl"));
    assert!(result.text().contains("It will not be shown again!"));
}

#[tokio::test]
async fn every_invocation_yields_exactly_one_envelope() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/wp-json/wp/v2/settings");
        then.status(200).json_body(json!({ "title": "Site" }));
    });

    let registry = registry_for(&server, "", "");

    // Success, validation failure, and transport failure all come back as
    // one well-formed envelope; nothing panics or escapes the registry.
    for (name, args) in [
        ("get_settings", json!({})),
        ("get_post", json!({})),
        ("get_post", json!({ "id": 123456 })),
    ] {
        let result = call(&registry, name, args).await;
        assert_eq!(result.content.len(), 1);
        assert!(result.is_error.is_none() || result.is_error == Some(true));
    }
}
