use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

/// Message returned when a chat request carries no question.
pub const NO_MESSAGE: &str = "No message provided";

/// A passage returned by the vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub score: f32,
    /// Remaining metadata stored alongside the vector (the text key removed)
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            score,
            metadata: Map::new(),
        }
    }
}

/// Output of one retrieval-generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub answer: String,
    /// Documents the answer was grounded on, in retrieval order
    pub context: Vec<Document>,
}

/// Which backend turns text into vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingProviderType {
    /// all-MiniLM-L6-v2 run in-process
    #[default]
    Local,
    OpenAI,
}

impl fmt::Display for EmbeddingProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingProviderType::Local => f.write_str("local"),
            EmbeddingProviderType::OpenAI => f.write_str("openai"),
        }
    }
}

impl FromStr for EmbeddingProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(EmbeddingProviderType::Local),
            "openai" => Ok(EmbeddingProviderType::OpenAI),
            other => Err(format!(
                "unknown embedding provider '{}', expected 'local' or 'openai'",
                other
            )),
        }
    }
}

// ===== Request/Response DTOs =====

/// Question sent to the chatbot
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    /// The user's question
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "No message provided"))]
    #[schema(example = "Where can I find the milk?")]
    pub message: String,
}

/// `null` is treated like an absent field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Answer produced by the chatbot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}
