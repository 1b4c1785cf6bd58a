mod gemini;

use async_trait::async_trait;

use crate::error::RagResult;

pub use gemini::{GeminiConfig, GeminiModel};

/// A single-turn prompt: system instruction plus the user's question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Hosted text-generation model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the model's text answer. An empty answer is an error.
    async fn generate(&self, prompt: &Prompt) -> RagResult<String>;
}
