//! Configuration management for the Lambda functions.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key. Optional so the service can boot and answer health
    /// checks without a credential; the rewrite endpoints fail without it.
    pub gemini_api_key: Option<String>,
    /// Gemini model identifier.
    pub gemini_model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling limit.
    pub top_p: f32,
    /// Top-k sampling limit.
    pub top_k: u32,
    /// Maximum reply size in tokens.
    pub max_output_tokens: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-exp".to_string()),
            temperature: parse_var("GEMINI_TEMPERATURE", 0.7),
            top_p: parse_var("GEMINI_TOP_P", 0.95),
            top_k: parse_var("GEMINI_TOP_K", 40),
            max_output_tokens: parse_var("GEMINI_MAX_OUTPUT_TOKENS", 8192),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
