//! # wp-mcp
//!
//! WordPress REST API exposed as Model Context Protocol (MCP) tools.
//!
//! This crate provides a JSON-RPC based stdio server that advertises the
//! WordPress content-management API as a catalog of schema-validated tools:
//! posts, pages, categories, tags, media, users, comments, and site
//! settings. Every tool invocation is translated into a single
//! authenticated HTTP request and rendered back as a uniform text envelope.

pub mod config;
pub mod mcp;
pub mod registry;
pub mod schema;
pub mod tools;
pub mod wp;

pub use config::{Settings, WpConfig};
pub use mcp::error::McpError;
pub use mcp::server::McpServer;
pub use registry::ToolRegistry;
pub use wp::client::WpClient;
