use async_trait::async_trait;
use core_config::{
    ConfigError, FromEnv, env_non_blank_or, env_or_default, env_parse_or, env_required,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatModel, Prompt};
use crate::error::{RagError, RagResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;

/// Gemini `generateContent` configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Bare model id, without the `models/` prefix
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = normalize_model(&model);
        self
    }
}

fn normalize_model(model: &str) -> String {
    let model = model.trim();
    model.strip_prefix("models/").unwrap_or(model).to_string()
}

impl FromEnv for GeminiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let temperature = env_parse_or("GEMINI_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Invalid {
                key: "GEMINI_TEMPERATURE".to_string(),
                details: format!("{} is outside 0.0..=2.0", temperature),
            });
        }

        Ok(Self {
            api_key: env_required("GOOGLE_AI_KEY")?,
            base_url: env_or_default("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            model: normalize_model(&env_non_blank_or("GEMINI_MODEL", DEFAULT_MODEL)?),
            temperature,
            max_output_tokens: env_parse_or("GEMINI_MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS)?,
        })
    }
}

// ===== Wire types =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> RagResult<String> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(RagError::Generation(format!("empty response: {}", reason)));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(RagError::Generation(format!(
                "candidate has no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

/// Google Gemini chat model
pub struct GeminiModel {
    client: Client,
    config: GeminiConfig,
}

impl GeminiModel {
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl ChatModel for GeminiModel {
    async fn generate(&self, prompt: &Prompt) -> RagResult<String> {
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![TextPart {
                    text: &prompt.system,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart { text: &prompt.user }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RagError::Generation(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RagError::Generation(format!("invalid Gemini response: {}", e)))?;

        let text = body.into_text()?;
        debug!(model = %self.config.model, chars = text.len(), "Gemini answered");
        Ok(text)
    }
}
