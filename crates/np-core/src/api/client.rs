//! Neuronpedia API HTTP Client
//!
//! Every method performs exactly one request; there is no retry or backoff.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::config::{API_KEY_ENV, NeuronpediaConfig};
use crate::error::{Error, Result};

use super::types::*;

/// `top_k` sent when the caller leaves it unset
pub const DEFAULT_TOP_K: u32 = 10;

/// Neuronpedia API client
#[derive(Clone, Debug)]
pub struct NeuronpediaClient {
    client: Client,
    base_url: String,
}

impl NeuronpediaClient {
    /// Create a new client from configuration
    ///
    /// Fails with [`Error::Config`] when no API key is configured.
    pub fn new(config: &NeuronpediaConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| Error::Config(format!("{} environment variable is required", API_KEY_ENV)))?;

        Self::with_base_url(api_key, &config.base_url)
    }

    /// Create with an explicit key and base URL (for testing or self-hosted instances)
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| Error::Config(format!("Invalid API key: {}", e)))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(Error::Http)?;

        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", base_url, e)))?;
        info!("Neuronpedia client initialized for: {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL with each segment appended as a single percent-encoded path segment,
    /// plus the encoded path relative to the base URL for logging
    ///
    /// Caller-supplied IDs go through here so `/`, `?`, `#` and `..` cannot
    /// leave the intended resource.
    fn segment_url(&self, segments: &[&str]) -> Result<(Url, String)> {
        for segment in segments {
            if segment.is_empty() || *segment == "." || *segment == ".." {
                return Err(Error::InvalidArguments(format!(
                    "invalid resource ID: {:?}",
                    segment
                )));
            }
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        let base_len = url.path().trim_end_matches('/').len();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        let path = url.path()[base_len..].to_string();
        Ok((url, path))
    }

    /// Send a request and turn non-2xx statuses into [`Error::Api`]
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Neuronpedia request to {} failed: {} - {}", path, status, body);
            return Err(Error::Api { status, body });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        let response = self.send(request, path).await?;
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(|e| Error::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Generate an explanation for a feature
    pub async fn generate_explanation(
        &self,
        model: &str,
        layer: u32,
        feature: u64,
    ) -> Result<Explanation> {
        let path = "/explanations/generate";
        debug!(model, layer, feature, "POST {}", path);

        let body = FeatureRef {
            model,
            layer,
            feature,
        };
        self.send_json(self.client.post(self.url(path)).json(&body), path)
            .await
    }

    /// Search explanations, optionally filtered by model and layer
    pub async fn search_explanations(
        &self,
        query: &str,
        model: Option<&str>,
        layer: Option<u32>,
    ) -> Result<Vec<Explanation>> {
        let path = "/explanations/search";
        debug!(query, ?model, ?layer, "GET {}", path);

        let params = ExplanationQuery {
            query,
            model,
            layer,
        };
        self.send_json(self.client.get(self.url(path)).query(&params), path)
            .await
    }

    /// Record a score for an explanation
    pub async fn score_explanation(&self, explanation_id: &str, score: f64) -> Result<()> {
        let (url, path) = self.segment_url(&["explanations", explanation_id, "score"])?;
        debug!(score, "POST {}", path);

        let body = ScoreRequest { score };
        self.send(self.client.post(url).json(&body), &path).await?;
        Ok(())
    }

    /// Delete an explanation
    pub async fn delete_explanation(&self, explanation_id: &str) -> Result<()> {
        let (url, path) = self.segment_url(&["explanations", explanation_id])?;
        debug!("DELETE {}", path);

        self.send(self.client.delete(url), &path).await?;
        info!("Deleted explanation: {}", explanation_id);
        Ok(())
    }

    /// Per-token activations of one feature on the given text
    pub async fn get_activations(
        &self,
        model: &str,
        layer: u32,
        feature: u64,
        text: &str,
    ) -> Result<Vec<Activation>> {
        let path = "/activations";
        debug!(model, layer, feature, "POST {}", path);

        let body = ActivationsRequest {
            model,
            layer,
            feature,
            text,
        };
        self.send_json(self.client.post(self.url(path)).json(&body), path)
            .await
    }

    /// Top activating features for the given text
    ///
    /// `None` and `Some(0)` both fall back to [`DEFAULT_TOP_K`].
    pub async fn search_top_features(
        &self,
        model: &str,
        layer: u32,
        text: &str,
        top_k: Option<u32>,
    ) -> Result<FeatureSearch> {
        let path = "/search/top-features";
        let top_k = top_k.filter(|k| *k > 0).unwrap_or(DEFAULT_TOP_K);
        debug!(model, layer, top_k, "POST {}", path);

        let body = TopFeaturesRequest {
            model,
            layer,
            text,
            top_k,
        };
        self.send_json(self.client.post(self.url(path)).json(&body), path)
            .await
    }

    /// Generate text steered by a feature
    pub async fn steer_generation(&self, request: &SteeringRequest) -> Result<SteeringResult> {
        let path = "/steering/generate";
        debug!(
            model = %request.model,
            layer = request.layer,
            feature = request.feature,
            strength = request.steering_strength,
            "POST {}",
            path
        );

        self.send_json(self.client.post(self.url(path)).json(request), path)
            .await
    }

    /// Create a custom steering vector
    pub async fn create_vector(
        &self,
        name: &str,
        values: &[f64],
        steering_strength: Option<f64>,
    ) -> Result<Vector> {
        let path = "/vectors";
        debug!(name, dimensions = values.len(), "POST {}", path);

        let body = CreateVectorRequest {
            name,
            values,
            steering_strength,
        };
        let vector: Vector = self
            .send_json(self.client.post(self.url(path)).json(&body), path)
            .await?;

        info!("Created vector: {}", vector.id);
        Ok(vector)
    }

    /// Get a vector by ID
    pub async fn get_vector(&self, vector_id: &str) -> Result<Vector> {
        let (url, path) = self.segment_url(&["vectors", vector_id])?;
        debug!("GET {}", path);

        self.send_json(self.client.get(url), &path).await
    }

    /// List all custom vectors
    pub async fn list_vectors(&self) -> Result<Vec<Vector>> {
        let path = "/vectors";
        debug!("GET {}", path);

        self.send_json(self.client.get(self.url(path)), path).await
    }

    /// Delete a vector by ID
    pub async fn delete_vector(&self, vector_id: &str) -> Result<()> {
        let (url, path) = self.segment_url(&["vectors", vector_id])?;
        debug!("DELETE {}", path);

        self.send(self.client.delete(url), &path).await?;
        info!("Deleted vector: {}", vector_id);
        Ok(())
    }

    /// Generate an attribution graph for a prompt
    pub async fn generate_attribution_graph(
        &self,
        request: &AttributionGraphRequest,
    ) -> Result<AttributionGraph> {
        let path = "/graph/generate";
        debug!("POST {}", path);

        self.send_json(self.client.post(self.url(path)).json(request), path)
            .await
    }
}
