//! Fake translation provider for testing.
//!
//! Returns deterministic payloads without network access. By default it
//! echoes the source payload with titles prefixed by the target language,
//! which is enough for most orchestrator tests; specific responses can be
//! registered per target language.

use super::{RecipePayload, RecipeTranslator, TranslatorError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct FakeTranslator {
    /// Map of target language -> canned payload.
    responses: RwLock<HashMap<String, RecipePayload>>,
    /// When set, every call fails with this message.
    failure: Option<String>,
}

#[allow(dead_code)]
impl FakeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A translator that returns `payload` for `target_language`.
    pub fn with_response(target_language: &str, payload: RecipePayload) -> Self {
        let translator = Self::new();
        translator.add_response(target_language, payload);
        translator
    }

    /// A translator whose every call fails, for upstream-error paths.
    pub fn failing(message: &str) -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn add_response(&self, target_language: &str, payload: RecipePayload) {
        self.responses
            .write()
            .unwrap()
            .insert(target_language.to_string(), payload);
    }

    fn echo(recipe: &RecipePayload, target_language: &str) -> RecipePayload {
        let mut translated = recipe.clone();
        translated.recipe_title = format!("[{target_language}] {}", recipe.recipe_title);
        translated.reasoning = format!("[{target_language}] {}", recipe.reasoning);
        translated.steps = recipe
            .steps
            .iter()
            .map(|step| format!("[{target_language}] {step}"))
            .collect();
        for entry in translated
            .ingredients_from_pantry
            .iter_mut()
            .chain(translated.shopping_list.iter_mut())
        {
            entry.name = format!("[{target_language}] {}", entry.name);
        }
        translated
    }
}

#[async_trait]
impl RecipeTranslator for FakeTranslator {
    async fn translate(
        &self,
        recipe: &RecipePayload,
        target_language: &str,
    ) -> Result<RecipePayload, TranslatorError> {
        if let Some(message) = &self.failure {
            return Err(TranslatorError::RequestFailed(message.clone()));
        }
        if let Some(canned) = self.responses.read().unwrap().get(target_language) {
            return Ok(canned.clone());
        }
        Ok(Self::echo(recipe, target_language))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
