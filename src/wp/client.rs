//! Authenticated WordPress REST client.

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::WpConfig;
use crate::mcp::error::McpError;

/// Fixed REST namespace prefix; every endpoint path is relative to it.
const API_PREFIX: &str = "/wp-json/wp/v2";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// One-shot HTTP client for the WordPress REST API.
///
/// Configuration is taken once at construction; there is no ambient state
/// and no retry logic. Every call is an independent request with a bounded
/// timeout, surfacing non-2xx statuses as [`McpError::Api`].
#[derive(Debug, Clone)]
pub struct WpClient {
    http: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl WpClient {
    pub fn new(config: &WpConfig) -> Result<Self, McpError> {
        let timeout = Duration::from_secs(config.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(concat!("wp-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Empty credentials mean unauthenticated requests.
        let credentials = if config.username.is_empty() || config.app_password.is_empty() {
            None
        } else {
            Some((config.username.clone(), config.app_password.clone()))
        };

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, endpoint)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some((username, password)) => request.basic_auth(username, Some(password)),
            None => request,
        }
    }

    /// GET an endpoint and parse the JSON payload.
    pub async fn get(&self, endpoint: &str) -> Result<Value, McpError> {
        debug!("GET {}", endpoint);
        let request = self
            .authorize(self.http.get(self.url(endpoint)))
            .header(CONTENT_TYPE, "application/json");
        Self::execute(request).await
    }

    /// Send a JSON body with the given verb (create, update, delete).
    pub async fn send_json(
        &self,
        method: Method,
        endpoint: &str,
        body: &Value,
    ) -> Result<Value, McpError> {
        debug!("{} {}", method, endpoint);
        let request = self
            .authorize(self.http.request(method, self.url(endpoint)))
            .json(body);
        Self::execute(request).await
    }

    /// Send a bodyless request, e.g. a sub-resource DELETE.
    pub async fn send(&self, method: Method, endpoint: &str) -> Result<Value, McpError> {
        debug!("{} {}", method, endpoint);
        let request = self
            .authorize(self.http.request(method, self.url(endpoint)))
            .header(CONTENT_TYPE, "application/json");
        Self::execute(request).await
    }

    /// Raw binary POST, used by media upload. The payload is sent as an
    /// octet stream with the filename in the Content-Disposition header.
    pub async fn post_bytes(
        &self,
        endpoint: &str,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<Value, McpError> {
        debug!("POST {} ({} bytes as {:?})", endpoint, bytes.len(), filename);
        let request = self
            .authorize(self.http.post(self.url(endpoint)))
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            )
            .body(bytes);
        Self::execute(request).await
    }

    async fn execute(request: RequestBuilder) -> Result<Value, McpError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(McpError::Api(Self::error_message(status, response).await));
        }

        Ok(response.json().await?)
    }

    /// Prefer the remote error body's `message` field; fall back to the
    /// status line when the body is not JSON or carries no message.
    async fn error_message(status: StatusCode, response: reqwest::Response) -> String {
        let fallback = format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        );

        match response.json::<Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(fallback),
            Err(_) => fallback,
        }
    }
}
