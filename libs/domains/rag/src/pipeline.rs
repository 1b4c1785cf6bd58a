use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{info, instrument};

use crate::config::{EmbeddingConfig, RagConfig};
use crate::embedding::{EmbeddingProvider, LocalEmbeddings, OpenAIProvider};
use crate::error::{RagError, RagResult};
use crate::generation::{ChatModel, GeminiModel, Prompt};
use crate::index::PineconeIndex;
use crate::models::{Answer, Document};
use crate::retriever::{Retriever, VectorRetriever};

/// Fixed instruction placed ahead of the retrieved context
pub const PROMPT_PREAMBLE: &str = "You are an assistant for question-answering tasks. \
Use the following pieces of retrieved context to answer the question. \
If you don't know the answer, say that you don't know. \
Use three sentences maximum and keep the answer concise.";

/// Preamble, a blank line, then each document's text separated by a blank line.
pub fn build_system_prompt(documents: &[Document]) -> String {
    let context = documents
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{}\n\n{}", PROMPT_PREAMBLE, context)
}

/// Retrieval-augmented generation: retrieve context, then ask the model.
///
/// Built once at startup and shared read-only between requests.
pub struct RagPipeline {
    retriever: Arc<dyn Retriever>,
    model: Arc<dyn ChatModel>,
}

impl RagPipeline {
    pub fn new(retriever: Arc<dyn Retriever>, model: Arc<dyn ChatModel>) -> Self {
        Self { retriever, model }
    }

    /// Wires the production collaborators: embeddings, Pinecone and Gemini.
    ///
    /// Loads the local embedding model (if selected) and resolves the Pinecone
    /// host, so a misconfigured deployment fails here rather than on the first request.
    pub async fn from_config(config: RagConfig) -> RagResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(|e| RagError::Config(format!("failed to build HTTP client: {}", e)))?;

        let embedder: Arc<dyn EmbeddingProvider> = match config.embedding {
            EmbeddingConfig::Local { cache_dir } => {
                let model = tokio::task::spawn_blocking(move || LocalEmbeddings::new(cache_dir))
                    .await
                    .map_err(|e| RagError::Embedding(format!("model loader failed: {}", e)))??;
                Arc::new(model)
            }
            EmbeddingConfig::OpenAI(openai) => Arc::new(OpenAIProvider::new(client.clone(), openai)),
        };
        info!(
            provider = %embedder.provider_type(),
            dimension = embedder.dimension(),
            "Embedding provider ready"
        );

        let index = PineconeIndex::connect(client.clone(), config.pinecone).await?;
        info!(host = %index.host(), "Pinecone index ready");

        let retriever =
            VectorRetriever::new(embedder, Arc::new(index)).with_top_k(config.top_k);
        let model = GeminiModel::new(client, config.gemini);

        Ok(Self::new(Arc::new(retriever), Arc::new(model)))
    }

    /// Answers `question` from the retrieved context.
    ///
    /// Zero retrieved documents is not an error; the model is asked anyway.
    #[instrument(skip_all, fields(question_len = question.len()))]
    pub async fn answer(&self, question: &str) -> RagResult<Answer> {
        if question.is_empty() {
            return Err(RagError::Validation(crate::models::NO_MESSAGE.to_string()));
        }

        let context = self.retriever.retrieve(question).await?;
        info!(documents = context.len(), "Retrieved context");

        let prompt = Prompt {
            system: build_system_prompt(&context),
            user: question.to_string(),
        };
        let answer = self.model.generate(&prompt).await?;

        Ok(Answer { answer, context })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MockChatModel;
    use crate::retriever::MockRetriever;

    fn docs() -> Vec<Document> {
        vec![
            Document::new("1", "Milk is in aisle 4.", 0.9),
            Document::new("2", "Eggs are next to the milk.", 0.8),
            Document::new("3", "The bakery opens at 7am.", 0.7),
        ]
    }

    #[test]
    fn test_system_prompt_joins_in_order() {
        let prompt = build_system_prompt(&docs());
        assert!(prompt.starts_with(PROMPT_PREAMBLE));
        assert!(prompt.ends_with(
            "\n\nMilk is in aisle 4.\n\nEggs are next to the milk.\n\nThe bakery opens at 7am."
        ));
    }

    #[test]
    fn test_system_prompt_with_no_documents() {
        assert_eq!(build_system_prompt(&[]), format!("{}\n\n", PROMPT_PREAMBLE));
    }

    #[tokio::test]
    async fn test_answer_passes_context_and_question_to_model() {
        let mut retriever = MockRetriever::new();
        retriever
            .expect_retrieve()
            .withf(|q| q == "Where is the milk?")
            .times(1)
            .returning(|_| Ok(docs()));

        let mut model = MockChatModel::new();
        model
            .expect_generate()
            .withf(|p| {
                p.user == "Where is the milk?"
                    && p.system.contains("Milk is in aisle 4.\n\nEggs are next to the milk.")
            })
            .times(1)
            .returning(|_| Ok("Aisle 4.".to_string()));

        let pipeline = RagPipeline::new(Arc::new(retriever), Arc::new(model));
        let answer = pipeline.answer("Where is the milk?").await.unwrap();

        assert_eq!(answer.answer, "Aisle 4.");
        assert_eq!(answer.context, docs());
    }

    #[tokio::test]
    async fn test_empty_context_still_invokes_model() {
        let mut retriever = MockRetriever::new();
        retriever.expect_retrieve().times(1).returning(|_| Ok(vec![]));

        let mut model = MockChatModel::new();
        model
            .expect_generate()
            .withf(|p| p.system == format!("{}\n\n", PROMPT_PREAMBLE))
            .times(1)
            .returning(|_| Ok("I don't know.".to_string()));

        let pipeline = RagPipeline::new(Arc::new(retriever), Arc::new(model));
        let answer = pipeline.answer("What is the wifi password?").await.unwrap();

        assert_eq!(answer.answer, "I don't know.");
        assert!(answer.context.is_empty());
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected_before_retrieval() {
        let mut retriever = MockRetriever::new();
        retriever.expect_retrieve().never();
        let mut model = MockChatModel::new();
        model.expect_generate().never();

        let pipeline = RagPipeline::new(Arc::new(retriever), Arc::new(model));
        let err = pipeline.answer("").await.unwrap_err();

        assert!(matches!(err, RagError::Validation(_)));
    }

    #[tokio::test]
    async fn test_retrieval_failure_skips_model() {
        let mut retriever = MockRetriever::new();
        retriever
            .expect_retrieve()
            .times(1)
            .returning(|_| Err(RagError::Index("connection refused".into())));
        let mut model = MockChatModel::new();
        model.expect_generate().never();

        let pipeline = RagPipeline::new(Arc::new(retriever), Arc::new(model));
        let err = pipeline.answer("Where is the milk?").await.unwrap_err();

        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let mut retriever = MockRetriever::new();
        retriever.expect_retrieve().returning(|_| Ok(docs()));
        let mut model = MockChatModel::new();
        model
            .expect_generate()
            .times(1)
            .returning(|_| Err(RagError::Generation("quota exceeded".into())));

        let pipeline = RagPipeline::new(Arc::new(retriever), Arc::new(model));
        let err = pipeline.answer("Where is the milk?").await.unwrap_err();

        assert!(matches!(err, RagError::Generation(_)));
    }
}
