//! Neuronpedia MCP server
//!
//! Exposes the registered tools through `tools/list` and `tools/call`.
//! The API client is built once from configuration and shared by every call.

use std::future::Future;
use std::sync::Arc;

use np_core::{API_KEY_ENV, Config, NeuronpediaClient, ServerConfig, ToolDefinition, ToolManager};
use np_tools::{register_default_tools, register_explanation_admin_tools};
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler};
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::error::into_mcp_error;

/// MCP server forwarding tool calls to the Neuronpedia API
#[derive(Clone)]
pub struct NeuronpediaServer {
    tools: Arc<ToolManager>,
    /// `None` when no API key is configured; every call then fails
    client: Option<Arc<NeuronpediaClient>>,
    server: ServerConfig,
}

impl NeuronpediaServer {
    /// Build the server, its catalog and its client from configuration
    pub fn new(config: &Config) -> np_core::Result<Self> {
        let mut tools = ToolManager::new();
        register_default_tools(&mut tools);
        if config.tools.explanation_admin {
            register_explanation_admin_tools(&mut tools);
        }

        info!(
            "Registered {} tools: {:?}",
            tools.len(),
            tools.tool_names()
        );

        let client = if config.neuronpedia.api_key().is_some() {
            Some(NeuronpediaClient::new(&config.neuronpedia)?)
        } else {
            warn!("{} is not set; tool calls will be rejected", API_KEY_ENV);
            None
        };

        Ok(Self::from_parts(tools, client, config.server.clone()))
    }

    /// Assemble a server from already-built parts
    pub fn from_parts(
        tools: ToolManager,
        client: Option<NeuronpediaClient>,
        server: ServerConfig,
    ) -> Self {
        Self {
            tools: Arc::new(tools),
            client: client.map(Arc::new),
            server,
        }
    }

    /// Catalog entries in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.definitions()
    }

    /// Catalog converted to MCP tool descriptors
    pub fn mcp_tools(&self) -> Vec<McpTool> {
        self.definitions()
            .into_iter()
            .map(|def| {
                let schema: JsonObject = match def.input_schema {
                    JsonValue::Object(map) => map,
                    _ => JsonObject::new(),
                };
                McpTool::new(def.name, def.description, Arc::new(schema))
            })
            .collect()
    }

    /// Run one tool call and wrap its output as a single text content item
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let client = self.client.as_deref().ok_or_else(|| {
            McpError::invalid_request(format!("{} environment variable is required", API_KEY_ENV), None)
        })?;

        let input = JsonValue::Object(arguments.unwrap_or_default());
        match self.tools.execute(name, client, input).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(result.output)])),
            Err(e) => {
                warn!(tool = name, "Tool call failed: {}", e);
                Err(into_mcp_error(name, e))
            }
        }
    }
}

impl ServerHandler for NeuronpediaServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: self.server.instructions.clone(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.server.name.clone(),
                version: self.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move { Ok(ListToolsResult::with_all_items(self.mcp_tools())) }
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { self.call(&request.name, request.arguments).await }
    }
}
