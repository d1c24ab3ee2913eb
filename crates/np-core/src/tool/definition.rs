//! Tool definition helpers
//!
//! Provides the catalog entry type and a builder for the JSON schemas
//! describing tool arguments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};

/// Catalog entry advertised through `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: JsonValue,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: JsonValue,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Builder for object schemas
///
/// # Example
/// ```ignore
/// let schema = SchemaBuilder::object()
///     .required("query", "string", "Search query")
///     .optional("layer", "number", "Optional layer filter")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    properties: Map<String, JsonValue>,
    required: Vec<String>,
}

impl SchemaBuilder {
    /// Start an empty object schema
    pub fn object() -> Self {
        Self::default()
    }

    /// Add a required scalar property
    pub fn required(mut self, name: &str, type_str: &str, description: &str) -> Self {
        self.required.push(name.to_string());
        self.optional(name, type_str, description)
    }

    /// Add an optional scalar property
    pub fn optional(mut self, name: &str, type_str: &str, description: &str) -> Self {
        self.properties.insert(
            name.to_string(),
            json!({"type": type_str, "description": description}),
        );
        self
    }

    /// Add a required array property whose items share one type
    pub fn required_array(mut self, name: &str, item_type: &str, description: &str) -> Self {
        self.required.push(name.to_string());
        self.properties.insert(
            name.to_string(),
            json!({
                "type": "array",
                "items": {"type": item_type},
                "description": description
            }),
        );
        self
    }

    /// Finish the schema; `required` is omitted when nothing is required
    pub fn build(self) -> JsonValue {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), JsonValue::Object(self.properties));
        if !self.required.is_empty() {
            schema.insert("required".to_string(), json!(self.required));
        }
        JsonValue::Object(schema)
    }
}
