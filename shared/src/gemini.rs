//! Gemini API client.
//!
//! Wraps the generateContent REST endpoint. The process-wide client is
//! created on first use, so the binaries can start and answer health checks
//! without a credential. Transport and quota failures are logged and
//! surfaced unchanged; retrying is the caller's decision, never ours.

use std::future::Future;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::{error, info};

use crate::config::Config;
use crate::{Error, Result};

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Anything that can turn a prompt into raw model text.
///
/// Seam between the orchestrator and the Gemini client, so the rewrite flow
/// can be exercised with a scripted generator in tests.
pub trait TextGenerator {
    /// Send a prompt and return the model's raw text reply.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Response body from generateContent.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    fn text(self) -> Option<String> {
        let candidate = self.candidates?.into_iter().next()?;
        let parts = candidate.content?.parts?;
        let text: String = parts.into_iter().filter_map(|part| part.text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the Gemini generateContent API.
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Create a new client from configuration.
    pub fn new(api_key: String, config: &Config) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
            model: config.gemini_model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// Send a prompt and return the model's raw text reply.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_ENDPOINT, self.model, self.api_key
        );

        let payload = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": self.temperature,
                "topP": self.top_p,
                "topK": self.top_k,
                "maxOutputTokens": self.max_output_tokens,
            }
        });

        let response = self
            .http_client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Gemini API error: {} - {}", status, body);
            return Err(Error::Upstream(format!("Gemini API error: {}", status)));
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse Gemini response: {}", e)))?;

        reply.text().ok_or(Error::EmptyResponse)
    }
}

/// Single-assignment cell guarding one-time client construction.
pub struct GeminiHandle {
    cell: OnceLock<GeminiClient>,
}

impl GeminiHandle {
    /// Create an empty handle.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Get the client, constructing it on first use.
    ///
    /// Fails fast with a configuration error when no API key is set;
    /// nothing is constructed in that case. Concurrent first calls
    /// construct exactly one client.
    pub fn get_or_init(&self, config: &Config) -> Result<&GeminiClient> {
        if let Some(client) = self.cell.get() {
            return Ok(client);
        }

        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| Error::Config("GEMINI_API_KEY is not set".to_string()))?;

        Ok(self.cell.get_or_init(|| {
            info!("Initializing Gemini client for model {}", config.gemini_model);
            GeminiClient::new(api_key, config)
        }))
    }
}

/// Process-wide client cell, created on first use.
static SHARED: GeminiHandle = GeminiHandle::new();

/// Get the process-wide Gemini client, constructing it on first use.
pub fn shared_client(config: &Config) -> Result<&'static GeminiClient> {
    SHARED.get_or_init(config)
}

/// Generator backed by the process-wide client.
///
/// Resolves the handle on each call rather than at startup, keeping the
/// binaries bootable without a credential.
pub struct GeminiGenerator<'a> {
    config: &'a Config,
}

impl<'a> GeminiGenerator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

impl TextGenerator for GeminiGenerator<'_> {
    async fn generate(&self, prompt: &str) -> Result<String> {
        shared_client(self.config)?.generate(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api_key: Option<&str>) -> Config {
        Config {
            gemini_api_key: api_key.map(String::from),
            gemini_model: "gemini-2.0-flash-exp".to_string(),
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
        }
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let handle = GeminiHandle::new();
        let result = handle.get_or_init(&test_config(None));
        assert!(matches!(result, Err(Error::Config(_))));

        // A later call with a key still initializes.
        assert!(handle.get_or_init(&test_config(Some("key"))).is_ok());
    }

    #[test]
    fn test_concurrent_first_use_constructs_once() {
        let handle = GeminiHandle::new();
        let config = test_config(Some("key"));

        let addresses: Vec<usize> = std::thread::scope(|scope| {
            (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        handle.get_or_init(&config).unwrap() as *const GeminiClient as usize
                    })
                })
                .collect::<Vec<_>>()
                .into_iter()
                .map(|thread| thread.join().unwrap())
                .collect()
        });

        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_reply_text_extraction() {
        let reply: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(reply.text().as_deref(), Some("Hello world"));

        let reply: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(reply.text().is_none());

        let reply: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(reply.text().is_none());
    }
}
