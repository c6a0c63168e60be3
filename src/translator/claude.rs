//! Claude (Anthropic) translation provider.

use super::{RecipePayload, RecipeTranslator, TranslatorError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Claude API provider.
#[derive(Debug)]
pub struct ClaudeTranslator {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl ClaudeTranslator {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeErrorResponse {
    error: ClaudeApiError,
}

#[derive(Debug, Deserialize)]
struct ClaudeApiError {
    message: String,
}

fn build_prompt(recipe_json: &str, target_language: &str) -> String {
    format!(
        r#"Translate every human-readable string value in this recipe JSON into {target_language}.

Rules:
- Keep the JSON structure and all field names exactly as they are.
- Keep array lengths and ordering unchanged.
- Translate names inside ingredients_from_pantry and shopping_list; keep quantity and unit values as-is unless the unit word itself needs translating.
- Do not translate language tags, booleans, or numbers.

Recipe:
{recipe_json}

Respond with ONLY the translated JSON object, no other text."#
    )
}

/// Strip an optional markdown code fence from a model response.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

#[async_trait]
impl RecipeTranslator for ClaudeTranslator {
    async fn translate(
        &self,
        recipe: &RecipePayload,
        target_language: &str,
    ) -> Result<RecipePayload, TranslatorError> {
        let recipe_json = serde_json::to_string_pretty(recipe)
            .map_err(|e| TranslatorError::RequestFailed(e.to_string()))?;

        let request = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: 4096,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: build_prompt(&recipe_json, target_language),
            }],
        };

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslatorError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TranslatorError::RequestFailed(e.to_string()))?;

        if status != 200 {
            if let Ok(error_response) = serde_json::from_str::<ClaudeErrorResponse>(&body) {
                return Err(TranslatorError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(TranslatorError::ApiError {
                status,
                message: body,
            });
        }

        let response: ClaudeResponse =
            serde_json::from_str(&body).map_err(|e| TranslatorError::ParseError(e.to_string()))?;

        let text = response
            .content
            .into_iter()
            .find_map(|c| {
                if c.content_type == "text" {
                    c.text
                } else {
                    None
                }
            })
            .ok_or_else(|| {
                TranslatorError::ParseError("No text content in response".to_string())
            })?;

        serde_json::from_str(strip_fences(&text))
            .map_err(|e| TranslatorError::ParseError(e.to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "claude"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_plain_json() {
        assert_eq!(strip_fences(r#"{"a":1}"#), r#"{"a":1}"#);
    }

    #[test]
    fn test_strip_fences_json_block() {
        assert_eq!(strip_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_bare_block() {
        assert_eq!(strip_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }
}
