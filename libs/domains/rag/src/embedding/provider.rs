use async_trait::async_trait;

use crate::error::RagResult;
use crate::models::EmbeddingProviderType;

/// Trait for embedding generation providers
///
/// The vectors must live in the same space the index was built with.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the provider type
    fn provider_type(&self) -> EmbeddingProviderType;

    /// Length of the vectors this provider returns
    fn dimension(&self) -> usize;

    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> RagResult<Vec<f32>>;
}
