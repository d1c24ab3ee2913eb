//! Explanation tools: generate, search, score and delete feature explanations

use async_trait::async_trait;
use np_core::{NeuronpediaClient, Result, SchemaBuilder, Tool, ToolResult, parse_input};
use serde::Deserialize;
use serde_json::Value;

/// Generate an explanation for a feature
pub struct GenerateExplanationTool;

#[derive(Debug, Deserialize)]
struct GenerateExplanationInput {
    model: String,
    layer: u32,
    feature: u64,
}

#[async_trait]
impl Tool for GenerateExplanationTool {
    fn name(&self) -> &str {
        "generate_explanation"
    }

    fn description(&self) -> &str {
        "Generate an explanation for a specific feature in an AI model"
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object()
            .required("model", "string", "Model name (e.g., gpt2-small)")
            .required("layer", "number", "Layer number")
            .required("feature", "number", "Feature number")
            .build()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: GenerateExplanationInput = parse_input(input)?;
        let explanation = client
            .generate_explanation(&input.model, input.layer, input.feature)
            .await?;
        ToolResult::json(&explanation)
    }
}

/// Search explanations across models and layers
pub struct SearchExplanationsTool;

#[derive(Debug, Deserialize)]
struct SearchExplanationsInput {
    query: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    layer: Option<u32>,
}

#[async_trait]
impl Tool for SearchExplanationsTool {
    fn name(&self) -> &str {
        "search_explanations"
    }

    fn description(&self) -> &str {
        "Search for explanations across models and layers"
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object()
            .required("query", "string", "Search query")
            .optional("model", "string", "Optional model filter")
            .optional("layer", "number", "Optional layer filter")
            .build()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: SearchExplanationsInput = parse_input(input)?;
        let explanations = client
            .search_explanations(&input.query, input.model.as_deref(), input.layer)
            .await?;
        ToolResult::json(&explanations)
    }
}

/// Score an existing explanation
pub struct ScoreExplanationTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreExplanationInput {
    explanation_id: String,
    score: f64,
}

#[async_trait]
impl Tool for ScoreExplanationTool {
    fn name(&self) -> &str {
        "score_explanation"
    }

    fn description(&self) -> &str {
        "Record a score for an existing explanation"
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object()
            .required("explanationId", "string", "Explanation ID")
            .required("score", "number", "Score to record")
            .build()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: ScoreExplanationInput = parse_input(input)?;
        client
            .score_explanation(&input.explanation_id, input.score)
            .await?;
        Ok(ToolResult::text(format!(
            "Explanation {} scored {}",
            input.explanation_id, input.score
        )))
    }
}

/// Delete an explanation
pub struct DeleteExplanationTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteExplanationInput {
    explanation_id: String,
}

#[async_trait]
impl Tool for DeleteExplanationTool {
    fn name(&self) -> &str {
        "delete_explanation"
    }

    fn description(&self) -> &str {
        "Delete an explanation by ID"
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object()
            .required("explanationId", "string", "Explanation ID")
            .build()
    }

    async fn execute(&self, client: &NeuronpediaClient, input: Value) -> Result<ToolResult> {
        let input: DeleteExplanationInput = parse_input(input)?;
        client.delete_explanation(&input.explanation_id).await?;
        Ok(ToolResult::text(format!(
            "Explanation {} deleted successfully",
            input.explanation_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::client_for;
    use np_core::Error;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_explanation() {
        let server = MockServer::start().await;
        let explanation = json!({
            "id": "exp-1",
            "text": "mentions of the Golden Gate Bridge",
            "model": "gpt2-small",
            "layer": 6,
            "feature": 42
        });

        Mock::given(method("POST"))
            .and(path("/explanations/generate"))
            .and(body_json(json!({"model": "gpt2-small", "layer": 6, "feature": 42})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&explanation))
            .expect(1)
            .mount(&server)
            .await;

        let result = GenerateExplanationTool
            .execute(
                &client_for(&server),
                json!({"model": "gpt2-small", "layer": 6, "feature": 42}),
            )
            .await
            .unwrap();

        let parsed: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(parsed, explanation);
    }

    #[tokio::test]
    async fn test_generate_explanation_passes_through_extra_fields() {
        let server = MockServer::start().await;
        let explanation = json!({
            "id": "exp-1",
            "text": "t",
            "model": "gpt2-small",
            "layer": 6,
            "feature": 1,
            "score": 3,
            "description": "kept",
            "authorId": "u1"
        });

        Mock::given(method("POST"))
            .and(path("/explanations/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&explanation))
            .expect(1)
            .mount(&server)
            .await;

        let result = GenerateExplanationTool
            .execute(
                &client_for(&server),
                json!({"model": "gpt2-small", "layer": 6, "feature": 1}),
            )
            .await
            .unwrap();

        assert!(result.output.contains("\"authorId\": \"u1\""));
        assert!(result.output.contains("\"score\": 3,"));
        let parsed: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(parsed, explanation);
    }

    #[tokio::test]
    async fn test_generate_explanation_missing_feature() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = GenerateExplanationTool
            .execute(&client_for(&server), json!({"model": "gpt2-small", "layer": 6}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
        assert!(err.to_string().contains("feature"));
    }

    #[tokio::test]
    async fn test_search_explanations_with_filters() {
        let server = MockServer::start().await;
        let results = json!([{
            "id": "exp-2",
            "text": "cat related tokens",
            "model": "gpt2-small",
            "layer": 3,
            "feature": 7,
            "score": 0.9
        }]);

        Mock::given(method("GET"))
            .and(path("/explanations/search"))
            .and(query_param("query", "cats"))
            .and(query_param("model", "gpt2-small"))
            .and(query_param("layer", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&results))
            .expect(1)
            .mount(&server)
            .await;

        let result = SearchExplanationsTool
            .execute(
                &client_for(&server),
                json!({"query": "cats", "model": "gpt2-small", "layer": 3}),
            )
            .await
            .unwrap();

        let parsed: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(parsed, results);
    }

    #[tokio::test]
    async fn test_score_explanation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/explanations/exp-1/score"))
            .and(body_json(json!({"score": 0.75})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = ScoreExplanationTool
            .execute(
                &client_for(&server),
                json!({"explanationId": "exp-1", "score": 0.75}),
            )
            .await
            .unwrap();
        assert_eq!(result.output, "Explanation exp-1 scored 0.75");
    }

    #[tokio::test]
    async fn test_delete_explanation() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/explanations/exp-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = DeleteExplanationTool
            .execute(&client_for(&server), json!({"explanationId": "exp-1"}))
            .await
            .unwrap();
        assert_eq!(result.output, "Explanation exp-1 deleted successfully");
    }
}
