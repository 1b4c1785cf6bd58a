use std::path::PathBuf;

use core_config::{ConfigError, FromEnv, env_parse_or};

use crate::embedding::OpenAIConfig;
use crate::generation::GeminiConfig;
use crate::index::PineconeConfig;
use crate::models::EmbeddingProviderType;
use crate::retriever::DEFAULT_TOP_K;

pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Embedding backend selection
#[derive(Debug, Clone)]
pub enum EmbeddingConfig {
    Local { cache_dir: Option<PathBuf> },
    OpenAI(OpenAIConfig),
}

impl EmbeddingConfig {
    pub fn provider_type(&self) -> EmbeddingProviderType {
        match self {
            EmbeddingConfig::Local { .. } => EmbeddingProviderType::Local,
            EmbeddingConfig::OpenAI(_) => EmbeddingProviderType::OpenAI,
        }
    }
}

impl FromEnv for EmbeddingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let provider: EmbeddingProviderType =
            env_parse_or("EMBEDDING_PROVIDER", EmbeddingProviderType::Local)?;

        Ok(match provider {
            EmbeddingProviderType::Local => EmbeddingConfig::Local {
                cache_dir: std::env::var_os("EMBEDDING_CACHE_DIR").map(PathBuf::from),
            },
            EmbeddingProviderType::OpenAI => EmbeddingConfig::OpenAI(OpenAIConfig::from_env()?),
        })
    }
}

/// Everything the retrieval-generation pipeline needs
#[derive(Debug, Clone)]
pub struct RagConfig {
    pub pinecone: PineconeConfig,
    pub gemini: GeminiConfig,
    pub embedding: EmbeddingConfig,
    pub top_k: usize,
    pub upstream_timeout_secs: u64,
}

impl FromEnv for RagConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let top_k = env_parse_or("RETRIEVER_TOP_K", DEFAULT_TOP_K)?;
        if top_k == 0 {
            return Err(ConfigError::Invalid {
                key: "RETRIEVER_TOP_K".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        let upstream_timeout_secs =
            env_parse_or("UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?;
        if upstream_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            pinecone: PineconeConfig::from_env()?,
            gemini: GeminiConfig::from_env()?,
            embedding: EmbeddingConfig::from_env()?,
            top_k,
            upstream_timeout_secs,
        })
    }
}
