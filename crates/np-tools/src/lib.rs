//! np-tools: Neuronpedia tools for neuronpedia-mcp
//!
//! One tool per Neuronpedia operation. Each tool deserializes its
//! arguments, forwards them to the API client and returns the response
//! as pretty-printed JSON.

use np_core::ToolManager;

pub mod activation;
pub mod explanation;
pub mod graph;
pub mod steering;
pub mod vector;

pub use activation::{GetActivationsTool, SearchTopFeaturesTool};
pub use explanation::{
    DeleteExplanationTool, GenerateExplanationTool, ScoreExplanationTool, SearchExplanationsTool,
};
pub use graph::GenerateAttributionGraphTool;
pub use steering::SteerGenerationTool;
pub use vector::{CreateVectorTool, DeleteVectorTool, GetVectorTool, ListVectorsTool};

use std::sync::Arc;

/// Register the default catalog with the tool manager
///
/// Registration order is the order `tools/list` reports.
pub fn register_default_tools(manager: &mut ToolManager) {
    manager.register(Arc::new(GenerateExplanationTool));
    manager.register(Arc::new(SearchExplanationsTool));
    manager.register(Arc::new(GetActivationsTool));
    manager.register(Arc::new(SearchTopFeaturesTool));
    manager.register(Arc::new(SteerGenerationTool));
    manager.register(Arc::new(CreateVectorTool));
    manager.register(Arc::new(ListVectorsTool));
    manager.register(Arc::new(GetVectorTool));
    manager.register(Arc::new(DeleteVectorTool));
    manager.register(Arc::new(GenerateAttributionGraphTool));
}

/// Register the explanation maintenance tools (`score_explanation`,
/// `delete_explanation`), which are off by default
pub fn register_explanation_admin_tools(manager: &mut ToolManager) {
    manager.register(Arc::new(ScoreExplanationTool));
    manager.register(Arc::new(DeleteExplanationTool));
}
