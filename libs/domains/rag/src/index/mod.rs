mod pinecone;

use async_trait::async_trait;

use crate::error::RagResult;
use crate::models::Document;

pub use pinecone::{PineconeConfig, PineconeIndex};

/// Similarity search over a pre-built vector index
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Returns at most `top_k` documents, most similar first.
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> RagResult<Vec<Document>>;
}
