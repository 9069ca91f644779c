//! Rewrite orchestration.
//!
//! One external call per request: validate the input, build the prompt,
//! send it, sanitize and parse the reply, shape-check it, and map it into
//! the response record. All-or-nothing; a reply that fails any step yields
//! an error and no partial result. Upstream detail is logged here and never
//! carried back to the caller.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};
use validator::Validate;

use crate::gemini::TextGenerator;
use crate::models::{
    GrammarCorrection, RewriteRequest, RewriteResponse, RewriteUpgradeResponse, Word,
};
use crate::response::{self, Violation};
use crate::{prompts, Error, Result};

/// Fields of the basic reply, extracted after shape validation.
#[derive(Debug, Deserialize)]
struct RewriteReply {
    rewritten_text: String,
    new_words: Vec<Word>,
}

/// Fields of the upgrade reply, extracted after shape validation.
#[derive(Debug, Deserialize)]
struct UpgradeReply {
    rewritten_text: String,
    grammar_corrections: Vec<GrammarCorrection>,
    new_words: Vec<Word>,
    writing_tips: Vec<String>,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    overall_feedback: String,
}

/// Orchestrates a single rewrite exchange with the model.
pub struct RewriteService<G> {
    generator: G,
}

impl<G: TextGenerator> RewriteService<G> {
    /// Create a new service over the given generator.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Rewrite the text at the requested band, returning text plus vocabulary.
    pub async fn rewrite(&self, request: &RewriteRequest) -> Result<RewriteResponse> {
        request
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        info!("Rewriting text to IELTS level {}", request.level);

        let prompt = prompts::rewrite_prompt(&request.text, request.level);
        let value = self.exchange(&prompt).await?;

        response::validate_rewrite(&value).map_err(log_violations)?;

        let reply: RewriteReply = serde_json::from_value(value)
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        info!("Rewrote text with {} new words", reply.new_words.len());

        Ok(RewriteResponse {
            original_text: request.text.clone(),
            rewritten_text: reply.rewritten_text,
            new_words: reply.new_words,
            ielts_level: request.level,
        })
    }

    /// Rewrite with grammar corrections, writing tips, and feedback.
    pub async fn rewrite_upgrade(
        &self,
        request: &RewriteRequest,
    ) -> Result<RewriteUpgradeResponse> {
        request
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        info!("Rewriting text with feedback to IELTS level {}", request.level);

        let prompt = prompts::rewrite_upgrade_prompt(&request.text, request.level);
        let value = self.exchange(&prompt).await?;

        response::validate_upgrade(&value).map_err(log_violations)?;

        let reply: UpgradeReply = serde_json::from_value(value)
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        info!(
            "Rewrote text with {} corrections and {} new words",
            reply.grammar_corrections.len(),
            reply.new_words.len()
        );

        Ok(RewriteUpgradeResponse {
            original_text: request.text.clone(),
            rewritten_text: reply.rewritten_text,
            grammar_corrections: reply.grammar_corrections,
            new_words: reply.new_words,
            writing_tips: reply.writing_tips,
            strengths: reply.strengths,
            weaknesses: reply.weaknesses,
            overall_feedback: reply.overall_feedback,
            ielts_level: request.level,
        })
    }

    /// Send the prompt and parse the sanitized reply as JSON.
    async fn exchange(&self, prompt: &str) -> Result<Value> {
        let raw = self.generator.generate(prompt).await.inspect_err(|e| {
            error!("Gemini call failed: {}", e);
        })?;

        debug!("Raw response: {}", snippet(&raw, 200));

        if raw.trim().is_empty() {
            error!("Empty response from Gemini");
            return Err(Error::EmptyResponse);
        }

        let cleaned = response::strip_code_fences(&raw);
        serde_json::from_str(&cleaned).map_err(|e| {
            error!(
                "JSON parse error: {}; problematic text: {}",
                e,
                snippet(&cleaned, 500)
            );
            Error::MalformedResponse(format!("reply is not valid JSON: {}", e))
        })
    }
}

/// Log shape violations and fold them into one malformed-response error.
fn log_violations(violations: Vec<Violation>) -> Error {
    let detail = violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    error!("Invalid response structure: {}", detail);
    Error::MalformedResponse(detail)
}

/// First `limit` characters of `text`, for log lines.
fn snippet(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
