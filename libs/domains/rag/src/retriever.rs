use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::embedding::EmbeddingProvider;
use crate::error::RagResult;
use crate::index::VectorIndex;
use crate::models::Document;

pub const DEFAULT_TOP_K: usize = 3;

/// Finds the documents most relevant to a query
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> RagResult<Vec<Document>>;
}

/// Embeds the query, then runs a similarity search over the index.
pub struct VectorRetriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    top_k: usize,
}

impl VectorRetriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            embedder,
            index,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    #[instrument(skip_all)]
    async fn retrieve(&self, query: &str) -> RagResult<Vec<Document>> {
        let vector = self.embedder.embed(query).await?;
        debug!(
            provider = %self.embedder.provider_type(),
            dimension = vector.len(),
            top_k = self.top_k,
            "Embedded query"
        );
        self.index.query(vector, self.top_k).await
    }
}
