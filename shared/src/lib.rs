//! Shared library for the Letter to Stars AI Lambda functions.
//!
//! This crate provides the configuration, data models, Gemini client, and the
//! rewrite orchestration flow used by the endpoint binaries in `api-gateway`.

pub mod config;
pub mod error;
pub mod gemini;
pub mod http;
pub mod models;
pub mod prompts;
pub mod response;
pub mod rewrite;

pub use config::Config;
pub use error::{Error, Result};
pub use gemini::{GeminiClient, GeminiGenerator, TextGenerator};
pub use models::{
    ApiResponse, GrammarCorrection, IeltsLevel, RewriteRequest, RewriteResponse,
    RewriteUpgradeResponse, Word,
};
pub use rewrite::RewriteService;
