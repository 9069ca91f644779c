//! Shared data models for the rewrite endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Target IELTS band for a rewrite.
///
/// Deserialized from the wire integer, so an out-of-range level is rejected
/// before any prompt is built or any external call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IeltsLevel {
    Band6,
    Band7,
    Band8,
    Band9,
}

impl IeltsLevel {
    /// All accepted bands, lowest first.
    pub const ALL: [IeltsLevel; 4] = [
        IeltsLevel::Band6,
        IeltsLevel::Band7,
        IeltsLevel::Band8,
        IeltsLevel::Band9,
    ];

    /// The band number as sent on the wire.
    pub fn band(self) -> u8 {
        match self {
            IeltsLevel::Band6 => 6,
            IeltsLevel::Band7 => 7,
            IeltsLevel::Band8 => 8,
            IeltsLevel::Band9 => 9,
        }
    }
}

impl TryFrom<u8> for IeltsLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(IeltsLevel::Band6),
            7 => Ok(IeltsLevel::Band7),
            8 => Ok(IeltsLevel::Band8),
            9 => Ok(IeltsLevel::Band9),
            other => Err(format!("IELTS level must be 6, 7, 8 or 9, got {}", other)),
        }
    }
}

impl From<IeltsLevel> for u8 {
    fn from(level: IeltsLevel) -> Self {
        level.band()
    }
}

impl fmt::Display for IeltsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.band())
    }
}

/// Rewrite request payload.
#[derive(Debug, Deserialize, Validate)]
pub struct RewriteRequest {
    /// The user's diary text.
    #[validate(length(
        min = 10,
        max = 10000,
        message = "text must be between 10 and 10000 characters"
    ))]
    pub text: String,
    /// Target IELTS band.
    pub level: IeltsLevel,
}

/// A vocabulary word the model added to the rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub english_word: String,
    pub turkish_meaning: String,
}

/// A grammar mistake the model corrected, with its explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarCorrection {
    pub original: String,
    pub corrected: String,
    pub explanation: String,
}

/// Rewrite response payload.
#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub original_text: String,
    pub rewritten_text: String,
    pub new_words: Vec<Word>,
    pub ielts_level: IeltsLevel,
}

/// Rewrite response payload with grammar corrections and feedback.
#[derive(Debug, Serialize)]
pub struct RewriteUpgradeResponse {
    pub original_text: String,
    pub rewritten_text: String,
    pub grammar_corrections: Vec<GrammarCorrection>,
    pub new_words: Vec<Word>,
    pub writing_tips: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub overall_feedback: String,
    pub ielts_level: IeltsLevel,
}

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
