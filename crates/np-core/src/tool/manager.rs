//! Tool manager for registering and executing tools

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::api::NeuronpediaClient;
use crate::tool::{Tool, ToolDefinition, ToolResult};
use crate::{Error, Result};

/// Manager for registered tools
///
/// Tools keep their registration order, which is the order of the
/// catalog returned by [`ToolManager::definitions`].
pub struct ToolManager {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolManager {
    /// Create a new empty tool manager
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool
    ///
    /// If a tool with the same name already exists, it is replaced in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(index) => self.tools[index] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Get all registered tool definitions in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Execute a tool by name
    ///
    /// # Errors
    /// Returns [`Error::UnknownTool`] if no tool has that name, otherwise
    /// whatever the tool itself fails with.
    pub async fn execute(
        &self,
        name: &str,
        client: &NeuronpediaClient,
        input: JsonValue,
    ) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        tracing::debug!(tool = name, "Executing tool");
        tool.execute(client, input).await
    }

    /// Check if a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all registered tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn input_schema(&self) -> JsonValue {
            json!({"type": "object", "properties": {}})
        }

        async fn execute(&self, _client: &NeuronpediaClient, input: JsonValue) -> Result<ToolResult> {
            ToolResult::json(&input)
        }
    }

    fn echo(name: &'static str, description: &'static str) -> Arc<dyn Tool> {
        Arc::new(EchoTool { name, description })
    }

    fn offline_client() -> NeuronpediaClient {
        NeuronpediaClient::with_base_url("test-key", "http://127.0.0.1:1").unwrap()
    }

    #[test]
    fn test_registration_order_is_stable() {
        let mut manager = ToolManager::new();
        manager.register(echo("b", "second"));
        manager.register(echo("a", "first"));
        manager.register(echo("c", "third"));

        assert_eq!(manager.tool_names(), vec!["b", "a", "c"]);
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut manager = ToolManager::new();
        manager.register(echo("a", "old"));
        manager.register(echo("b", "other"));
        manager.register(echo("a", "new"));

        let defs = manager.definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "a");
        assert_eq!(defs[0].description, "new");
    }

    #[tokio::test]
    async fn test_execute_known_tool() {
        let mut manager = ToolManager::new();
        manager.register(echo("echo", "Echo input"));

        let result = manager
            .execute("echo", &offline_client(), json!({"x": 1}))
            .await
            .unwrap();
        assert_eq!(result.output, "{\n  \"x\": 1\n}");
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let manager = ToolManager::new();
        let err = manager
            .execute("nonexistent_tool", &offline_client(), json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnknownTool(ref name) if name == "nonexistent_tool"));
        assert!(!manager.contains("nonexistent_tool"));
        assert!(manager.is_empty());
    }
}
