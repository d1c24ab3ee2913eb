//! Neuronpedia API types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

// ============================================================================
// Response types
//
// Declared fields are required and type-checked. Anything else the server
// sends is kept in `extra`, and numbers stay `Number` so integers are not
// rewritten as floats when the record is serialized back to the caller.
// ============================================================================

/// Fields the server sent that the record does not declare
pub type Extra = Map<String, Value>;

/// Natural-language explanation of a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub id: String,
    pub text: String,
    pub model: String,
    pub layer: u32,
    pub feature: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Number>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Activation of one feature at one token position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    pub feature: u64,
    pub activation: Number,
    pub token: String,
    pub position: u32,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A feature and its activation strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureActivation {
    pub feature: u64,
    pub activation: Number,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Top activating features for a text, aligned with its tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSearch {
    pub features: Vec<FeatureActivation>,
    pub tokens: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Output of a steered generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteeringResult {
    pub text: String,
    pub steering_strength: Number,
    pub feature: u64,
    #[serde(flatten)]
    pub extra: Extra,
}

/// User-created steering vector persisted by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub id: String,
    pub name: String,
    pub values: Vec<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steering_strength: Option<Number>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Pointer to a generated attribution graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionGraph {
    pub graph_url: String,
    pub metadata: AttributionGraphMetadata,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionGraphMetadata {
    pub nodes: u64,
    pub links: u64,
    pub model: String,
    pub prompt: String,
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Request types
// ============================================================================

/// Steered generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SteeringRequest {
    pub model: String,
    pub layer: u32,
    pub feature: u64,
    pub prompt: String,
    pub steering_strength: f64,
    pub is_chat: bool,
}

/// Attribution graph request; unset thresholds are left to the server
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttributionGraphRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_logits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FeatureRef<'a> {
    pub model: &'a str,
    pub layer: u32,
    pub feature: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExplanationQuery<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreRequest {
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ActivationsRequest<'a> {
    pub model: &'a str,
    pub layer: u32,
    pub feature: u64,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TopFeaturesRequest<'a> {
    pub model: &'a str,
    pub layer: u32,
    pub text: &'a str,
    pub top_k: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateVectorRequest<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steering_strength: Option<f64>,
}
