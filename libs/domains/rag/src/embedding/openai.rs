use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use super::local::MINILM_DIMENSION;
use crate::error::{RagError, RagResult};
use crate::models::EmbeddingProviderType;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// OpenAI embedding provider configuration
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Requested output size; must match the index dimension
    pub dimensions: usize,
}

impl OpenAIConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            dimensions: MINILM_DIMENSION,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl FromEnv for OpenAIConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("OPENAI_API_KEY")?,
            base_url: env_or_default("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            model: env_or_default("OPENAI_EMBEDDING_MODEL", DEFAULT_MODEL),
            dimensions: env_parse_or("OPENAI_EMBEDDING_DIMENSIONS", MINILM_DIMENSION)?,
        })
    }
}

/// OpenAI embeddings provider
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn new(client: Client, config: OpenAIConfig) -> Self {
        Self { client, config }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
    dimensions: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn provider_type(&self) -> EmbeddingProviderType {
        EmbeddingProviderType::OpenAI
    }

    fn dimension(&self) -> usize {
        self.config.dimensions
    }

    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.config.model,
            input: vec![text],
            dimensions: self.config.dimensions,
        };

        let response = self
            .client
            .post(format!(
                "{}/embeddings",
                self.config.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RagError::Embedding(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| RagError::Embedding(format!("invalid OpenAI response: {}", e)))?;

        embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| RagError::Embedding("No embedding returned".to_string()))
    }
}
