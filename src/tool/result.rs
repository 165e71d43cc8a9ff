// ABOUTME: Defines the ToolResult type - the JSON payload a tool hands back
// ABOUTME: to the runtime, with helpers for the status/error conventions.

use serde::Serialize;
use serde_json::{Map, Value};

/// Result of a tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The payload returned to the runtime.
    pub content: Value,

    /// Whether this result represents an error.
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result from any serializable payload.
    pub fn json(content: impl Serialize) -> Self {
        Self {
            content: serde_json::to_value(content).unwrap_or(Value::Null),
            is_error: false,
        }
    }

    /// Create a plain text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Value::String(content.into()),
            is_error: false,
        }
    }

    /// Create a `{"error": message}` result.
    pub fn error(message: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("error".to_string(), Value::String(message.into()));
        Self {
            content: Value::Object(map),
            is_error: true,
        }
    }

    /// Create a `{"status": "failed", "error": message}` result.
    pub fn failed(message: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("status".to_string(), Value::String("failed".to_string()));
        map.insert("error".to_string(), Value::String(message.into()));
        Self {
            content: Value::Object(map),
            is_error: true,
        }
    }

    /// A text result the runtime should read as a user-facing error message.
    pub fn message_error(message: impl Into<String>) -> Self {
        Self {
            content: Value::String(message.into()),
            is_error: true,
        }
    }

    /// Add a field to an object payload. Non-object payloads are left as is.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let (Value::Object(map), Ok(v)) = (&mut self.content, serde_json::to_value(value)) {
            map.insert(key.into(), v);
        }
        self
    }

    /// Look up a top-level field of an object payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.content.get(key)
    }

    /// The payload's `status` field, if any.
    pub fn status(&self) -> Option<&str> {
        self.content.get("status").and_then(Value::as_str)
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::json(Map::new())
    }
}
