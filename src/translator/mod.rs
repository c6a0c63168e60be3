//! Translation-provider abstraction.
//!
//! The translator is an opaque function from a language-agnostic recipe
//! payload plus a target language to the same payload with translated
//! strings. Its output is untrusted: it may omit fields or return empty
//! arrays, and the orchestrator defends against both.

mod claude;
mod fake;

pub use claude::ClaudeTranslator;
pub use fake::FakeTranslator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

use crate::recipes::normalize::NormalizedEntry;

/// Error type for translation calls.
#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error("Translation request failed: {0}")]
    RequestFailed(String),

    #[error("Translator returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse translator response: {0}")]
    ParseError(String),

    #[error("Translator not configured: {0}")]
    NotConfigured(String),
}

/// The language-agnostic recipe shape exchanged with the translator. The same
/// shape comes back with translated strings; field names are the wire
/// contract.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipePayload {
    pub recipe_title: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub analysis_log: String,
    #[serde(default = "default_true")]
    pub is_safe: bool,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub ingredients_from_pantry: Vec<NormalizedEntry>,
    #[serde(default)]
    pub shopping_list: Vec<NormalizedEntry>,
}

fn default_true() -> bool {
    true
}

/// Trait for translation providers.
///
/// Implementations should be stateless and thread-safe; one provider instance
/// is shared across all requests via the application context.
#[async_trait]
pub trait RecipeTranslator: Send + Sync + fmt::Debug {
    /// Translate every human-readable string in the payload into
    /// `target_language`, preserving structure and array order.
    async fn translate(
        &self,
        recipe: &RecipePayload,
        target_language: &str,
    ) -> Result<RecipePayload, TranslatorError>;

    fn provider_name(&self) -> &'static str;
}

/// Build a provider from environment configuration:
/// - TRANSLATOR_PROVIDER: "claude" | "fake" (default: "fake")
/// - ANTHROPIC_API_KEY: API key for Claude
/// - TRANSLATOR_MODEL: model name override
pub fn create_translator_from_env() -> Result<Box<dyn RecipeTranslator>, TranslatorError> {
    let provider = std::env::var("TRANSLATOR_PROVIDER").unwrap_or_else(|_| "fake".to_string());

    match provider.as_str() {
        "fake" => Ok(Box::new(FakeTranslator::default())),
        "claude" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
                TranslatorError::NotConfigured("ANTHROPIC_API_KEY not set".to_string())
            })?;
            let model = std::env::var("TRANSLATOR_MODEL")
                .unwrap_or_else(|_| "claude-3-5-sonnet-20241022".to_string());
            Ok(Box::new(ClaudeTranslator::new(api_key, model)))
        }
        other => Err(TranslatorError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
