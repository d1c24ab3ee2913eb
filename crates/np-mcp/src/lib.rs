//! np-mcp: MCP (Model Context Protocol) server
//!
//! np-core のツールシステムを rmcp の ServerHandler として公開し、
//! ツールエラーを MCP エラーに変換する機能を提供します。

pub mod error;
pub mod server;

pub use error::into_mcp_error;
pub use server::NeuronpediaServer;
