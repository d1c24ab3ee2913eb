//! Activation tools: per-token activations and top feature search

use async_trait::async_trait;
use np_core::{NeuronpediaClient, Result, SchemaBuilder, Tool, ToolResult, parse_input};
use serde::Deserialize;
use serde_json::Value;

/// Activation values of one feature on a text
pub struct GetActivationsTool;

#[derive(Debug, Deserialize)]
struct GetActivationsInput {
    model: String,
    layer: u32,
    feature: u64,
    text: String,
}

#[async_trait]
impl Tool for GetActivationsTool {
    fn name(&self) -> &str {
        "get_activations"
    }

    fn description(&self) -> &str {
        "Get activation values for a specific feature on given text"
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object()
            .required("model", "string", "Model name")
            .required("layer", "number", "Layer number")
            .required("feature", "number", "Feature number")
            .required("text", "string", "Input text to analyze")
            .build()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: GetActivationsInput = parse_input(input)?;
        let activations = client
            .get_activations(&input.model, input.layer, input.feature, &input.text)
            .await?;
        ToolResult::json(&activations)
    }
}

/// Top activating features for a text
pub struct SearchTopFeaturesTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchTopFeaturesInput {
    model: String,
    layer: u32,
    text: String,
    #[serde(default)]
    top_k: Option<u32>,
}

#[async_trait]
impl Tool for SearchTopFeaturesTool {
    fn name(&self) -> &str {
        "search_top_features"
    }

    fn description(&self) -> &str {
        "Find the top activating features for given text"
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object()
            .required("model", "string", "Model name")
            .required("layer", "number", "Layer number")
            .required("text", "string", "Input text to analyze")
            .optional(
                "topK",
                "number",
                "Number of top features to return (default: 10)",
            )
            .build()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: SearchTopFeaturesInput = parse_input(input)?;
        let search = client
            .search_top_features(&input.model, input.layer, &input.text, input.top_k)
            .await?;
        ToolResult::json(&search)
    }
}
