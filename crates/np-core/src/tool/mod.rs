//! Tool system for MCP tool calls
//!
//! This module provides the tool abstraction, schema helpers and the
//! name-to-tool dispatcher used by the MCP server.

pub mod definition;
pub mod manager;
pub mod traits;

pub use definition::{SchemaBuilder, ToolDefinition};
pub use manager::ToolManager;
pub use traits::{Tool, ToolResult, parse_input};
