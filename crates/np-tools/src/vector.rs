//! Vector tools for managing custom steering vectors

use async_trait::async_trait;
use np_core::{NeuronpediaClient, Result, SchemaBuilder, Tool, ToolResult, parse_input};
use serde::Deserialize;
use serde_json::Value;

/// Create a custom steering vector
pub struct CreateVectorTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateVectorInput {
    name: String,
    values: Vec<f64>,
    #[serde(default)]
    steering_strength: Option<f64>,
}

#[async_trait]
impl Tool for CreateVectorTool {
    fn name(&self) -> &str {
        "create_vector"
    }

    fn description(&self) -> &str {
        "Create a custom vector for steering"
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object()
            .required("name", "string", "Vector name")
            .required_array("values", "number", "Vector values")
            .optional("steeringStrength", "number", "Optional steering strength")
            .build()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: CreateVectorInput = parse_input(input)?;
        let vector = client
            .create_vector(&input.name, &input.values, input.steering_strength)
            .await?;
        ToolResult::json(&vector)
    }
}

/// List all custom vectors
pub struct ListVectorsTool;

#[async_trait]
impl Tool for ListVectorsTool {
    fn name(&self) -> &str {
        "list_vectors"
    }

    fn description(&self) -> &str {
        "List all custom vectors"
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object().build()
    }

    async fn execute(&self, client: &NeuronpediaClient, _input: Value) -> Result<ToolResult> {
        let vectors = client.list_vectors().await?;
        tracing::debug!(count = vectors.len(), "Listed vectors");
        ToolResult::json(&vectors)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VectorIdInput {
    vector_id: String,
}

fn vector_id_schema() -> Value {
    SchemaBuilder::object()
        .required("vectorId", "string", "Vector ID")
        .build()
}

/// Get a vector by ID
pub struct GetVectorTool;

#[async_trait]
impl Tool for GetVectorTool {
    fn name(&self) -> &str {
        "get_vector"
    }

    fn description(&self) -> &str {
        "Get a specific vector by ID"
    }

    fn input_schema(&self) -> Value {
        vector_id_schema()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: VectorIdInput = parse_input(input)?;
        let vector = client.get_vector(&input.vector_id).await?;
        ToolResult::json(&vector)
    }
}

/// Delete a vector by ID
pub struct DeleteVectorTool;

#[async_trait]
impl Tool for DeleteVectorTool {
    fn name(&self) -> &str {
        "delete_vector"
    }

    fn description(&self) -> &str {
        "Delete a vector by ID"
    }

    fn input_schema(&self) -> Value {
        vector_id_schema()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: VectorIdInput = parse_input(input)?;
        client.delete_vector(&input.vector_id).await?;
        Ok(ToolResult::text(format!(
            "Vector {} deleted successfully",
            input.vector_id
        )))
    }
}
