//! Uniform result envelopes.
//!
//! Every tool invocation ends in exactly one of these shapes. Both
//! constructors are infallible; they are the last line of defense and
//! must always produce a well-formed envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// A single content block inside a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

/// The envelope returned by every tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResult {
    pub fn is_success(&self) -> bool {
        self.is_error != Some(true)
    }

    /// The rendered text block.
    pub fn text(&self) -> &str {
        match self.content.first() {
            Some(Content::Text { text }) => text,
            None => "",
        }
    }
}

/// Wrap a payload, preceded by an optional summary line, in the success
/// envelope. The payload is pretty-printed after a blank line.
pub fn success(data: &Value, message: Option<&str>) -> ToolResult {
    let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    let text = match message {
        Some(message) => format!("{}\n\n{}", message, json),
        None => json,
    };

    ToolResult {
        content: vec![Content::Text { text }],
        is_error: None,
    }
}

/// Wrap any failure in the error envelope.
pub fn failure(err: &impl Display) -> ToolResult {
    ToolResult {
        content: vec![Content::Text {
            text: format!("Error: {}", err),
        }],
        is_error: Some(true),
    }
}
