//! RAG Domain Library
//!
//! Retrieval-augmented question answering over a Pinecone index, with
//! answers generated by Google Gemini.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   RagPipeline   │  ← question → context → prompt → answer
//! └───┬─────────┬───┘
//!     │         │
//! ┌───▼──────┐ ┌▼──────────┐
//! │ Retriever│ │ ChatModel │
//! │ (trait)  │ │ (trait)   │
//! └───┬──────┘ └┬──────────┘
//!     │         │
//! ┌───▼─────────────┐  ┌──────────────┐
//! │ VectorRetriever │  │ GeminiModel  │
//! │  EmbeddingProv. │  └──────────────┘
//! │  VectorIndex    │
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_rag::{RagConfig, RagPipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RagConfig::from_env()?;
//! let pipeline = RagPipeline::from_config(config).await?;
//!
//! let answer = pipeline.answer("Where can I find the milk?").await?;
//! println!("{}", answer.answer);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod handlers;
pub mod index;
pub mod models;
pub mod pipeline;
pub mod retriever;

// Re-export commonly used types
pub use config::{EmbeddingConfig, RagConfig};
pub use embedding::{EmbeddingProvider, LocalEmbeddings, OpenAIConfig, OpenAIProvider};
pub use error::{RagError, RagResult};
pub use generation::{ChatModel, GeminiConfig, GeminiModel, Prompt};
pub use handlers::{ChatApiDoc, router};
pub use index::{PineconeConfig, PineconeIndex, VectorIndex};
pub use models::{Answer, ChatRequest, ChatResponse, Document, EmbeddingProviderType, NO_MESSAGE};
pub use pipeline::{PROMPT_PREAMBLE, RagPipeline, build_system_prompt};
pub use retriever::{Retriever, VectorRetriever};
