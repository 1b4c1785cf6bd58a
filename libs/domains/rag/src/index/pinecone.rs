//! Pinecone REST client
//!
//! The control plane (`api.pinecone.io`) is only used once, to resolve the
//! index's data-plane host. Queries go straight to that host.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_non_blank_or, env_or_default, env_required};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::VectorIndex;
use crate::error::{RagError, RagResult};
use crate::models::Document;

pub const DEFAULT_CONTROL_PLANE_URL: &str = "https://api.pinecone.io";
pub const DEFAULT_INDEX_NAME: &str = "grocerybot";
const API_VERSION: &str = "2024-07";
/// Metadata key the ingestion job stores passage text under
const TEXT_KEY: &str = "text";

/// Pinecone connection configuration
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    pub index_name: String,
    /// Data-plane host; resolved from the control plane when `None`
    pub index_host: Option<String>,
    pub namespace: Option<String>,
    pub control_plane_url: String,
}

impl PineconeConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            index_host: None,
            namespace: None,
            control_plane_url: DEFAULT_CONTROL_PLANE_URL.to_string(),
        }
    }

    pub fn with_index_name(mut self, name: String) -> Self {
        self.index_name = name;
        self
    }

    pub fn with_index_host(mut self, host: String) -> Self {
        self.index_host = Some(host);
        self
    }

    pub fn with_namespace(mut self, namespace: String) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn with_control_plane_url(mut self, url: String) -> Self {
        self.control_plane_url = url;
        self
    }
}

fn non_blank(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FromEnv for PineconeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("PINECONE_API_KEY")?,
            index_name: env_non_blank_or("PINECONE_INDEX_NAME", DEFAULT_INDEX_NAME)?,
            index_host: non_blank("PINECONE_INDEX_HOST"),
            namespace: non_blank("PINECONE_NAMESPACE"),
            control_plane_url: env_or_default(
                "PINECONE_CONTROL_PLANE_URL",
                DEFAULT_CONTROL_PLANE_URL,
            ),
        })
    }
}

/// Hosts come back from the control plane without a scheme.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[derive(Debug, Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: Vec<f32>,
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

impl QueryMatch {
    /// Splits the passage text out of the metadata. Matches without text are dropped.
    fn into_document(self) -> Option<Document> {
        let mut metadata = self.metadata.unwrap_or_default();
        match metadata.remove(TEXT_KEY) {
            Some(Value::String(text)) => Some(Document {
                id: self.id,
                text,
                score: self.score,
                metadata,
            }),
            _ => {
                warn!(id = %self.id, "Found document with no `{}` key. Skipping.", TEXT_KEY);
                None
            }
        }
    }
}

/// Query client bound to one Pinecone index.
pub struct PineconeIndex {
    client: Client,
    api_key: String,
    host: String,
    namespace: Option<String>,
}

impl PineconeIndex {
    /// Builds the client, asking the control plane for the index host unless one is configured.
    pub async fn connect(client: Client, config: PineconeConfig) -> RagResult<Self> {
        let host = match config.index_host.as_deref() {
            Some(host) => normalize_host(host),
            None => {
                let host = describe_index_host(&client, &config).await?;
                info!(index = %config.index_name, host = %host, "Resolved Pinecone index host");
                host
            }
        };

        Ok(Self {
            client,
            api_key: config.api_key,
            host,
            namespace: config.namespace,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

fn authorized(request: RequestBuilder, api_key: &str) -> RequestBuilder {
    request
        .header("Api-Key", api_key)
        .header("X-Pinecone-API-Version", API_VERSION)
}

async fn describe_index_host(client: &Client, config: &PineconeConfig) -> RagResult<String> {
    let url = format!(
        "{}/indexes/{}",
        config.control_plane_url.trim_end_matches('/'),
        config.index_name
    );

    let response = authorized(client.get(url), &config.api_key)
        .send()
        .await
        .map_err(|e| RagError::Index(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(RagError::Index(format!(
            "failed to describe index '{}' ({}): {}",
            config.index_name, status, error_text
        )));
    }

    let described: DescribeIndexResponse = response
        .json()
        .await
        .map_err(|e| RagError::Index(format!("invalid describe-index response: {}", e)))?;

    Ok(normalize_host(&described.host))
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> RagResult<Vec<Document>> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            include_values: false,
            namespace: self.namespace.as_deref(),
        };

        let response = authorized(
            self.client.post(format!("{}/query", self.host)),
            &self.api_key,
        )
        .json(&request)
        .send()
        .await
        .map_err(|e| RagError::Index(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RagError::Index(format!(
                "Pinecone query error ({}): {}",
                status, error_text
            )));
        }

        let query_response: QueryResponse = response
            .json()
            .await
            .map_err(|e| RagError::Index(format!("invalid query response: {}", e)))?;

        let documents: Vec<Document> = query_response
            .matches
            .into_iter()
            .filter_map(QueryMatch::into_document)
            .take(top_k)
            .collect();
        debug!(count = documents.len(), "Pinecone query returned documents");

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_host() {
        assert_eq!(
            normalize_host("grocerybot-abc.svc.pinecone.io"),
            "https://grocerybot-abc.svc.pinecone.io"
        );
        assert_eq!(
            normalize_host("http://127.0.0.1:5081/"),
            "http://127.0.0.1:5081"
        );
    }

    #[test]
    fn test_query_request_shape() {
        let request = QueryRequest {
            vector: vec![0.5, 0.25],
            top_k: 3,
            include_metadata: true,
            include_values: false,
            namespace: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "vector": [0.5, 0.25],
                "topK": 3,
                "includeMetadata": true,
                "includeValues": false
            })
        );
    }

    #[test]
    fn test_match_without_text_is_dropped() {
        let m: QueryMatch = serde_json::from_value(json!({
            "id": "a",
            "score": 0.9,
            "metadata": {"source": "aisles.pdf"}
        }))
        .unwrap();
        assert!(m.into_document().is_none());
    }

    #[test]
    fn test_match_text_moves_out_of_metadata() {
        let m: QueryMatch = serde_json::from_value(json!({
            "id": "a",
            "score": 0.9,
            "metadata": {"text": "Milk is in aisle 4", "source": "aisles.pdf"}
        }))
        .unwrap();
        let doc = m.into_document().unwrap();
        assert_eq!(doc.text, "Milk is in aisle 4");
        assert_eq!(doc.metadata.get("source"), Some(&json!("aisles.pdf")));
        assert!(!doc.metadata.contains_key("text"));
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("PINECONE_API_KEY", Some("pc-key")),
                ("PINECONE_INDEX_NAME", None),
                ("PINECONE_INDEX_HOST", Some("  ")),
                ("PINECONE_NAMESPACE", None),
                ("PINECONE_CONTROL_PLANE_URL", None),
            ],
            || {
                let config = PineconeConfig::from_env().unwrap();
                assert_eq!(config.index_name, "grocerybot");
                assert_eq!(config.index_host, None);
                assert_eq!(config.namespace, None);
                assert_eq!(config.control_plane_url, DEFAULT_CONTROL_PLANE_URL);
            },
        );
    }

    #[test]
    fn test_from_env_requires_api_key() {
        temp_env::with_var_unset("PINECONE_API_KEY", || {
            assert!(matches!(
                PineconeConfig::from_env(),
                Err(ConfigError::MissingEnvVar(ref key)) if key == "PINECONE_API_KEY"
            ));
        });
    }

    #[test]
    fn test_from_env_rejects_blank_index_name() {
        temp_env::with_vars(
            [
                ("PINECONE_API_KEY", Some("pc-key")),
                ("PINECONE_INDEX_NAME", Some("")),
            ],
            || {
                assert!(matches!(
                    PineconeConfig::from_env(),
                    Err(ConfigError::Invalid { ref key, .. }) if key == "PINECONE_INDEX_NAME"
                ));
            },
        );
    }
}
