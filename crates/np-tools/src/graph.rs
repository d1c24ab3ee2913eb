//! Attribution graph tool

use async_trait::async_trait;
use np_core::{
    AttributionGraphRequest, NeuronpediaClient, Result, SchemaBuilder, Tool, ToolResult,
    parse_input,
};
use serde::Deserialize;
use serde_json::Value;

/// Generate an attribution graph for a prompt
pub struct GenerateAttributionGraphTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateAttributionGraphInput {
    prompt: String,
    #[serde(default)]
    max_logits: Option<u32>,
    #[serde(default)]
    logit_probability: Option<f64>,
    #[serde(default)]
    node_threshold: Option<f64>,
    #[serde(default)]
    edge_threshold: Option<f64>,
}

#[async_trait]
impl Tool for GenerateAttributionGraphTool {
    fn name(&self) -> &str {
        "generate_attribution_graph"
    }

    fn description(&self) -> &str {
        "Generate an attribution graph for analyzing text prompts"
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object()
            .required("prompt", "string", "Text prompt to analyze")
            .optional("maxLogits", "number", "Maximum number of logits (optional)")
            .optional(
                "logitProbability",
                "number",
                "Logit probability threshold (optional)",
            )
            .optional("nodeThreshold", "number", "Node threshold for graph (optional)")
            .optional("edgeThreshold", "number", "Edge threshold for graph (optional)")
            .build()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: GenerateAttributionGraphInput = parse_input(input)?;
        let request = AttributionGraphRequest {
            prompt: input.prompt,
            max_logits: input.max_logits,
            logit_probability: input.logit_probability,
            node_threshold: input.node_threshold,
            edge_threshold: input.edge_threshold,
        };

        let graph = client.generate_attribution_graph(&request).await?;
        tracing::info!(url = %graph.graph_url, "Attribution graph generated");
        ToolResult::json(&graph)
    }
}
