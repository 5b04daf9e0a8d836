//! Ollama embeddings client
//!
//! Calls `POST /api/embeddings` on an Ollama server, one prompt per request.

use serde_json::{json, Value};
use std::time::Duration;
use ureq::AgentBuilder;

use super::discovery::{
    find_embed_model, find_ollama_endpoint, DEFAULT_EMBED_MODEL, DEFAULT_OLLAMA_URL,
};
use super::Embedder;
use crate::error::{Result, VibeError};

/// Ollama client configuration
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server (default: http://localhost:11434)
    pub base_url: String,
    /// Embedding model name (default: nomic-embed-text)
    pub model: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Expected vector length, if known up front
    pub expected_dimension: Option<usize>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_EMBED_MODEL.to_string(),
            timeout_secs: 30,
            expected_dimension: None,
        }
    }
}

impl OllamaConfig {
    /// Resolve endpoint and model from explicit values, then the environment
    pub fn discover(base_url: Option<&str>, model: Option<&str>) -> Result<Self> {
        Ok(Self {
            base_url: find_ollama_endpoint(base_url)?,
            model: find_embed_model(model),
            ..Self::default()
        })
    }
}

/// Embedding client for an Ollama server
pub struct OllamaEmbedding {
    agent: ureq::Agent,
    endpoint: String,
    config: OllamaConfig,
}

impl OllamaEmbedding {
    /// Create a client; does not contact the server
    pub fn new(config: OllamaConfig) -> Self {
        let agent = AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        let endpoint = format!("{}/api/embeddings", config.base_url.trim_end_matches('/'));

        log::info!("Ollama embeddings at {} (model: {})", endpoint, config.model);

        Self {
            agent,
            endpoint,
            config,
        }
    }
}

impl Embedder for OllamaEmbedding {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let payload = json!({ "model": self.config.model, "prompt": text });

        let response = self
            .agent
            .post(&self.endpoint)
            .send_json(payload)
            .map_err(|e| match e {
                ureq::Error::Status(code, resp) => {
                    let body = resp.into_string().unwrap_or_default();
                    VibeError::external_service(format!(
                        "Ollama returned HTTP {}: {}",
                        code,
                        body.trim()
                    ))
                }
                ureq::Error::Transport(t) => {
                    VibeError::external_service(format!("Ollama request failed: {}", t))
                }
            })?;

        let value: Value = response.into_json().map_err(|e| {
            VibeError::external_service(format!("Unreadable Ollama response: {}", e))
        })?;

        parse_embedding_response(value)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

/// Extract the `embedding` array from an Ollama response body
pub(crate) fn parse_embedding_response(value: Value) -> Result<Vec<f32>> {
    let embedding = match value {
        Value::Object(mut map) => map.remove("embedding").ok_or_else(|| {
            let detail = map
                .get("error")
                .and_then(Value::as_str)
                .map(|e| format!(": {}", e))
                .unwrap_or_default();
            VibeError::external_service(format!("response has no `embedding` field{}", detail))
        })?,
        other => {
            return Err(VibeError::external_service(format!(
                "response must be an object, got {}",
                other
            )))
        }
    };

    match embedding {
        Value::Array(values) => values
            .into_iter()
            .map(|entry| match entry {
                Value::Number(num) => num
                    .as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| VibeError::external_service("non-finite embedding value")),
                other => Err(VibeError::external_service(format!(
                    "embedding entries must be numbers, got {}",
                    other
                ))),
            })
            .collect(),
        other => Err(VibeError::external_service(format!(
            "embedding must be an array, got {}",
            other
        ))),
    }
}
