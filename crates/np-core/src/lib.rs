//! np-core: Neuronpedia MCP Core Library
//!
//! Neuronpedia API との通信、ツールシステム、設定管理の
//! コア機能を提供します。

pub mod api;
pub mod config;
pub mod error;
pub mod tool;

pub use api::{
    Activation, AttributionGraph, AttributionGraphMetadata, AttributionGraphRequest,
    DEFAULT_TOP_K, Explanation, Extra, FeatureActivation, FeatureSearch, NeuronpediaClient,
    SteeringRequest, SteeringResult, Vector,
};
pub use config::{API_KEY_ENV, Config, NeuronpediaConfig, ServerConfig, ToolsConfig};
pub use error::{Error, Result};
pub use tool::{SchemaBuilder, Tool, ToolDefinition, ToolManager, ToolResult, parse_input};
