//! MCP エラー変換
//!
//! np-core のエラーをツール呼び出しの失敗として MCP エラーに変換します。

use np_core::Error;
use rmcp::ErrorData as McpError;
use rmcp::model::ErrorCode;

/// Convert a tool failure into the MCP error returned to the caller
///
/// - unknown tool: `MethodNotFound`
/// - bad arguments: `InvalidParams`
/// - configuration: `InvalidRequest`
/// - anything raised by the API call: `InternalError`, prefixed with the tool name
pub fn into_mcp_error(tool: &str, err: Error) -> McpError {
    match err {
        Error::UnknownTool(name) => McpError::new(
            ErrorCode::METHOD_NOT_FOUND,
            format!("Unknown tool: {}", name),
            None,
        ),
        Error::InvalidArguments(message) => McpError::invalid_params(
            format!("Invalid arguments for tool {}: {}", tool, message),
            None,
        ),
        Error::Config(message) => McpError::invalid_request(message, None),
        other => McpError::internal_error(format!("Error calling tool {}: {}", tool, other), None),
    }
}
