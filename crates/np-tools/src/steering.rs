//! Steering tool

use async_trait::async_trait;
use np_core::{
    NeuronpediaClient, Result, SchemaBuilder, SteeringRequest, Tool, ToolResult, parse_input,
};
use serde::Deserialize;
use serde_json::Value;

/// Steer model generation with a feature direction
pub struct SteerGenerationTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SteerGenerationInput {
    model: String,
    layer: u32,
    feature: u64,
    prompt: String,
    steering_strength: f64,
    #[serde(default)]
    is_chat: bool,
}

impl From<SteerGenerationInput> for SteeringRequest {
    fn from(input: SteerGenerationInput) -> Self {
        Self {
            model: input.model,
            layer: input.layer,
            feature: input.feature,
            prompt: input.prompt,
            steering_strength: input.steering_strength,
            is_chat: input.is_chat,
        }
    }
}

#[async_trait]
impl Tool for SteerGenerationTool {
    fn name(&self) -> &str {
        "steer_generation"
    }

    fn description(&self) -> &str {
        "Steer model generation using a specific feature"
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object()
            .required("model", "string", "Model name")
            .required("layer", "number", "Layer number")
            .required("feature", "number", "Feature number")
            .required("prompt", "string", "Generation prompt")
            .required("steeringStrength", "number", "Steering strength (-10 to 10)")
            .optional(
                "isChat",
                "boolean",
                "Whether this is a chat model (default: false)",
            )
            .build()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: SteerGenerationInput = parse_input(input)?;
        let request = SteeringRequest::from(input);
        let result = client.steer_generation(&request).await?;
        ToolResult::json(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn steered() -> Value {
        json!({"text": "The bridge is golden", "steering_strength": 4.0, "feature": 42})
    }

    #[tokio::test]
    async fn test_steer_generation_defaults_is_chat() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/steering/generate"))
            .and(body_json(json!({
                "model": "gpt2-small",
                "layer": 6,
                "feature": 42,
                "prompt": "The bridge",
                "steering_strength": 4.0,
                "is_chat": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(steered()))
            .expect(1)
            .mount(&server)
            .await;

        let result = SteerGenerationTool
            .execute(
                &client_for(&server),
                json!({
                    "model": "gpt2-small",
                    "layer": 6,
                    "feature": 42,
                    "prompt": "The bridge",
                    "steeringStrength": 4.0
                }),
            )
            .await
            .unwrap();

        let parsed: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(parsed, steered());
    }

    #[tokio::test]
    async fn test_steer_generation_chat_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/steering/generate"))
            .and(body_json(json!({
                "model": "gemma-2-2b-it",
                "layer": 12,
                "feature": 42,
                "prompt": "Hi",
                "steering_strength": -2.5,
                "is_chat": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(steered()))
            .expect(1)
            .mount(&server)
            .await;

        SteerGenerationTool
            .execute(
                &client_for(&server),
                json!({
                    "model": "gemma-2-2b-it",
                    "layer": 12,
                    "feature": 42,
                    "prompt": "Hi",
                    "steeringStrength": -2.5,
                    "isChat": true
                }),
            )
            .await
            .unwrap();
    }
}
