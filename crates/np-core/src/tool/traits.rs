//! Tool trait definition
//!
//! Defines the core trait for tools that forward a call to the
//! Neuronpedia API.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::api::NeuronpediaClient;
use crate::{Error, Result};

/// Tool execution result
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// Text returned to the caller as a single content item
    pub output: String,
}

impl ToolResult {
    /// Create a plain text result
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
        }
    }

    /// Create a result holding pretty-printed JSON (2-space indent)
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self {
            output: serde_json::to_string_pretty(value)?,
        })
    }
}

/// Tool trait for MCP tool calls
///
/// Implement this trait to expose a Neuronpedia operation as a tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name (used in `tools/list` and `tools/call`)
    fn name(&self) -> &str;

    /// Get the tool description
    fn description(&self) -> &str;

    /// Get the JSON schema for the tool's input parameters
    fn input_schema(&self) -> JsonValue;

    /// Execute the tool with the given input
    ///
    /// # Arguments
    /// * `client` - Client the call is forwarded to
    /// * `input` - JSON value containing the tool input parameters
    async fn execute(&self, client: &NeuronpediaClient, input: JsonValue) -> Result<ToolResult>;
}

/// Deserialize tool input into its typed form
///
/// A missing argument object is treated as `{}` so that the error names
/// the first missing field.
pub fn parse_input<T: DeserializeOwned>(input: JsonValue) -> Result<T> {
    let input = if input.is_null() {
        JsonValue::Object(Default::default())
    } else {
        input
    };

    serde_json::from_value(input).map_err(|e| Error::InvalidArguments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Input {
        model: String,
        #[serde(default)]
        layer: Option<u32>,
    }

    #[test]
    fn test_json_result_is_pretty_printed() {
        let result = ToolResult::json(&json!({"a": [1, 2]})).unwrap();
        assert_eq!(result.output, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn test_parse_input() {
        let input: Input = parse_input(json!({"model": "gpt2-small", "layer": 3})).unwrap();
        assert_eq!(input.model, "gpt2-small");
        assert_eq!(input.layer, Some(3));
    }

    #[test]
    fn test_parse_input_null_reports_missing_field() {
        let err = parse_input::<Input>(JsonValue::Null).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
        assert!(err.to_string().contains("missing field `model`"));
    }

    #[test]
    fn test_parse_input_wrong_type() {
        let err = parse_input::<Input>(json!({"model": 5})).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }
}
