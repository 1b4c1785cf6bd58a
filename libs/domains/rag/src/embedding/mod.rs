mod local;
mod openai;
mod provider;

pub use local::{LocalEmbeddings, MINILM_DIMENSION};
pub use openai::{OpenAIConfig, OpenAIProvider};
#[cfg(test)]
pub use provider::MockEmbeddingProvider;
pub use provider::EmbeddingProvider;
