//! Query-string and JSON-body construction.
//!
//! Absent parameters are omitted entirely: a field the caller did not
//! supply never appears as a key, neither in the query string nor in a
//! write body. List values repeat the key once per element, in order.

use serde_json::Value;
use url::form_urlencoded;

use crate::schema::{Arguments, ToolSchema};

/// Ordered key/value list; append order is preserved in the output.
#[derive(Debug, Default)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter; `None` and JSON null are skipped, arrays expand
    /// to one pair per element.
    pub fn push(&mut self, key: &str, value: Option<&Value>) {
        match value {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for item in items {
                    self.entries.push((key.to_string(), scalar_text(item)));
                }
            }
            Some(value) => self.entries.push((key.to_string(), scalar_text(value))),
        }
    }

    /// Append an always-present parameter, e.g. a path filter derived from
    /// a caller-facing id.
    pub fn append(&mut self, key: &str, value: impl ToString) {
        self.entries.push((key.to_string(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// URL-encoded query string in append order.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Collect every schema field present in `args` into query parameters, in
/// schema declaration order.
pub fn query_from_args(schema: &ToolSchema, args: &Arguments) -> Params {
    query_from_args_except(schema, args, &[])
}

/// Like [`query_from_args`], skipping fields consumed elsewhere (path
/// segments, renamed filters).
pub fn query_from_args_except(schema: &ToolSchema, args: &Arguments, skip: &[&str]) -> Params {
    let mut params = Params::new();
    for field in schema.fields() {
        if skip.contains(&field.name()) {
            continue;
        }
        params.push(field.name(), args.get(field.name()));
    }
    params
}

/// JSON body for a write: schema fields present in `args`, absent fields
/// never serialized.
pub fn body_from_args(
    schema: &ToolSchema,
    args: &Arguments,
    skip: &[&str],
) -> serde_json::Map<String, Value> {
    let mut body = serde_json::Map::new();
    for field in schema.fields() {
        if skip.contains(&field.name()) {
            continue;
        }
        if let Some(value) = args.get(field.name()) {
            if !value.is_null() {
                body.insert(field.name().to_string(), value.clone());
            }
        }
    }
    body
}

/// Join a resource path with an optional query string.
pub fn with_query(path: &str, params: &Params) -> String {
    if params.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, params.encode())
    }
}
