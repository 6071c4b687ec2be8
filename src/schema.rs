//! Declarative input schemas for tools.
//!
//! One [`ToolSchema`] value serves two consumers: the registry validates
//! incoming arguments against it, and `tools/list` renders it as the
//! advertised JSON Schema. Both views are generated from the same field
//! table, so they cannot drift apart.

use serde_json::{json, Value};

use crate::mcp::error::McpError;

/// Validated tool arguments, as received in a `tools/call` request.
pub type Arguments = serde_json::Map<String, Value>;

/// The accepted shape of a single field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    /// A string restricted to a fixed set of values.
    Enum(&'static [&'static str]),
    /// An ordered list of integers.
    IntArray,
    /// An ordered list of strings.
    StringArray,
    /// An ordered list of strings, each restricted to a fixed set.
    EnumArray(&'static [&'static str]),
}

#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    kind: FieldKind,
    description: &'static str,
    required: bool,
    min: Option<i64>,
    max: Option<i64>,
}

impl Field {
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn check(&self, value: &Value) -> Result<(), McpError> {
        let ok = match self.kind {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => {
                if let Some(n) = value.as_i64() {
                    self.min.map_or(true, |min| n >= min) && self.max.map_or(true, |max| n <= max)
                } else {
                    false
                }
            }
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Enum(options) => value
                .as_str()
                .map_or(false, |s| options.contains(&s)),
            FieldKind::IntArray => value
                .as_array()
                .map_or(false, |items| items.iter().all(Value::is_i64)),
            FieldKind::StringArray => value
                .as_array()
                .map_or(false, |items| items.iter().all(Value::is_string)),
            FieldKind::EnumArray(options) => value.as_array().map_or(false, |items| {
                items
                    .iter()
                    .all(|item| item.as_str().map_or(false, |s| options.contains(&s)))
            }),
        };

        if ok {
            Ok(())
        } else {
            Err(McpError::InvalidParams(format!(
                "field '{}' must be {}",
                self.name,
                self.expectation()
            )))
        }
    }

    fn expectation(&self) -> String {
        match self.kind {
            FieldKind::String => "a string".to_string(),
            FieldKind::Integer => match (self.min, self.max) {
                (Some(min), Some(max)) => format!("an integer between {} and {}", min, max),
                _ => "an integer".to_string(),
            },
            FieldKind::Number => "a number".to_string(),
            FieldKind::Boolean => "a boolean".to_string(),
            FieldKind::Enum(options) => format!("one of {}", options.join(", ")),
            FieldKind::IntArray => "an array of integers".to_string(),
            FieldKind::StringArray => "an array of strings".to_string(),
            FieldKind::EnumArray(options) => {
                format!("an array of values from {}", options.join(", "))
            }
        }
    }

    fn json_schema(&self) -> Value {
        let mut schema = match self.kind {
            FieldKind::String => json!({ "type": "string" }),
            FieldKind::Integer => json!({ "type": "integer" }),
            FieldKind::Number => json!({ "type": "number" }),
            FieldKind::Boolean => json!({ "type": "boolean" }),
            FieldKind::Enum(options) => json!({ "type": "string", "enum": options }),
            FieldKind::IntArray => json!({ "type": "array", "items": { "type": "integer" } }),
            FieldKind::StringArray => json!({ "type": "array", "items": { "type": "string" } }),
            FieldKind::EnumArray(options) => {
                json!({ "type": "array", "items": { "type": "string", "enum": options } })
            }
        };

        let obj = schema.as_object_mut().expect("schema literal is an object");
        obj.insert("description".to_string(), json!(self.description));
        if let Some(min) = self.min {
            obj.insert("minimum".to_string(), json!(min));
        }
        if let Some(max) = self.max {
            obj.insert("maximum".to_string(), json!(max));
        }
        schema
    }
}

/// Ordered field table describing one tool's input.
#[derive(Debug, Clone, Default)]
pub struct ToolSchema {
    fields: Vec<Field>,
}

impl ToolSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(
        mut self,
        name: &'static str,
        kind: FieldKind,
        description: &'static str,
    ) -> Self {
        self.fields.push(Field {
            name,
            kind,
            description,
            required: true,
            min: None,
            max: None,
        });
        self
    }

    pub fn optional(
        mut self,
        name: &'static str,
        kind: FieldKind,
        description: &'static str,
    ) -> Self {
        self.fields.push(Field {
            name,
            kind,
            description,
            required: false,
            min: None,
            max: None,
        });
        self
    }

    /// Constrain the most recently added integer field to an inclusive range.
    pub fn range(mut self, min: i64, max: i64) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.min = Some(min);
            field.max = Some(max);
        }
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Check `args` against the field table. Required fields must be
    /// present and non-null; present fields must match their declared
    /// kind; keys outside the table are rejected.
    pub fn validate(&self, args: &Arguments) -> Result<(), McpError> {
        for field in &self.fields {
            match args.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(McpError::InvalidParams(format!(
                            "missing required field '{}'",
                            field.name
                        )));
                    }
                }
                Some(value) => field.check(value)?,
            }
        }

        for key in args.keys() {
            if !self.fields.iter().any(|f| f.name == key) {
                return Err(McpError::InvalidParams(format!("unknown field '{}'", key)));
            }
        }

        Ok(())
    }

    /// Render the advertised JSON Schema for `tools/list`.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            properties.insert(field.name.to_string(), field.json_schema());
            if field.required {
                required.push(field.name);
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}
