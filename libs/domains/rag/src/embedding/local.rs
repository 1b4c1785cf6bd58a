use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use super::EmbeddingProvider;
use crate::error::{RagError, RagResult};
use crate::models::EmbeddingProviderType;

/// Output size of all-MiniLM-L6-v2
pub const MINILM_DIMENSION: usize = 384;

/// In-process sentence-transformer embeddings (all-MiniLM-L6-v2 via ONNX).
///
/// Inference is CPU-bound, so each call runs on the blocking pool.
pub struct LocalEmbeddings {
    model: Arc<TextEmbedding>,
}

impl LocalEmbeddings {
    /// Loads the model, downloading it into `cache_dir` on first use.
    pub fn new(cache_dir: Option<PathBuf>) -> RagResult<Self> {
        let mut options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir);
        }

        let model = TextEmbedding::try_new(options).map_err(|e| {
            RagError::Embedding(format!("failed to load all-MiniLM-L6-v2: {}", e))
        })?;
        info!("Loaded local embedding model all-MiniLM-L6-v2");

        Ok(Self {
            model: Arc::new(model),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for LocalEmbeddings {
    fn provider_type(&self) -> EmbeddingProviderType {
        EmbeddingProviderType::Local
    }

    fn dimension(&self) -> usize {
        MINILM_DIMENSION
    }

    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        let model = Arc::clone(&self.model);
        let input = vec![text.to_string()];

        let mut vectors = tokio::task::spawn_blocking(move || model.embed(input, None))
            .await
            .map_err(|e| RagError::Embedding(format!("embedding task failed: {}", e)))?
            .map_err(|e| RagError::Embedding(e.to_string()))?;

        vectors
            .pop()
            .ok_or_else(|| RagError::Embedding("No embedding returned".to_string()))
    }
}
