//! Translation orchestration.
//!
//! Translating a recipe never mutates the source: it creates a new recipe row
//! linked to the family root, re-resolves catalog entries under the
//! translated names, and rebuilds the joins. All writes happen in one
//! transaction after the translator call has succeeded, so a failed
//! translation leaves nothing behind.

use diesel::prelude::*;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    NewRecipe, NewRecipeIngredient, NewRecipeShoppingItem, Recipe, ShoppingItem,
};
use crate::recipes::catalog::{self, ShoppingExtra};
use crate::recipes::family;
use crate::recipes::normalize::{display_entry, NormalizedEntry};
use crate::schema::{ingredients, recipe_ingredients, recipe_shopping_items, recipes, shopping_items};
use crate::translator::{RecipePayload, RecipeTranslator, TranslatorError};

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("targetLanguage is required")]
    MissingTargetLanguage,

    #[error("Recipe not found")]
    RecipeNotFound,

    #[error("Translation failed: {0}")]
    Translator(#[from] TranslatorError),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// What the translate endpoint returns: the translated payload (not a DB
/// re-fetch) plus the id of the recipe row backing it.
#[derive(Debug)]
pub struct TranslatedRecipeView {
    pub id: Uuid,
    pub language: String,
    pub payload: RecipePayload,
}

/// Which arrays were substituted from the source because the translator
/// returned them empty.
#[derive(Debug, Default, PartialEq, Eq)]
struct Fallbacks {
    shopping_list: bool,
    pantry: bool,
}

pub async fn translate_recipe(
    conn: &mut PgConnection,
    translator: &dyn RecipeTranslator,
    kitchen_id: Uuid,
    recipe_id: Uuid,
    target_language: &str,
) -> Result<TranslatedRecipeView, TranslateError> {
    let target_language = target_language.trim();
    if target_language.is_empty() {
        return Err(TranslateError::MissingTargetLanguage);
    }

    let source: Recipe = recipes::table
        .find(recipe_id)
        .filter(recipes::kitchen_id.eq(kitchen_id))
        .select(Recipe::as_select())
        .first(conn)
        .optional()?
        .ok_or(TranslateError::RecipeNotFound)?;

    // Translations always hang off the family root, even when the request
    // names an intermediate translation.
    let root_id = family::root_id(&source);

    // Idempotence: an existing family member in the target language is
    // returned as-is, with no translator call and no writes.
    let existing: Option<Recipe> = recipes::table
        .filter(recipes::kitchen_id.eq(source.kitchen_id))
        .filter(recipes::language.eq(target_language))
        .filter(
            recipes::original_recipe_id
                .eq(root_id)
                .or(recipes::id.eq(root_id)),
        )
        .select(Recipe::as_select())
        .first(conn)
        .optional()?;

    if let Some(existing) = existing {
        tracing::info!(
            recipe_id = %recipe_id,
            existing_id = %existing.id,
            language = %target_language,
            "translation already exists, skipping translator call"
        );
        let payload = build_payload(
            &existing,
            load_pantry_entries(conn, existing.id)?,
            entries_of(&load_shopping_items(conn, existing.id)?),
        );
        return Ok(TranslatedRecipeView {
            id: existing.id,
            language: existing.language.clone(),
            payload,
        });
    }

    let source_shopping = load_shopping_items(conn, source.id)?;
    let source_payload = build_payload(
        &source,
        load_pantry_entries(conn, source.id)?,
        entries_of(&source_shopping),
    );

    let translated = translator
        .translate(&source_payload, target_language)
        .await?;

    let (merged, fallbacks) = apply_translation(&source_payload, translated);
    if fallbacks.shopping_list {
        tracing::warn!(
            recipe_id = %recipe_id,
            language = %target_language,
            "translator dropped the shopping list, keeping original items"
        );
    }
    if fallbacks.pantry {
        tracing::warn!(
            recipe_id = %recipe_id,
            language = %target_language,
            "translator dropped the pantry ingredients, keeping original items"
        );
    }

    let new_id = persist_translation(conn, &source, &source_shopping, &merged, target_language)?;

    tracing::info!(
        recipe_id = %recipe_id,
        new_id = %new_id,
        root_id = %root_id,
        language = %target_language,
        provider = translator.provider_name(),
        "created translated recipe"
    );

    Ok(TranslatedRecipeView {
        id: new_id,
        language: target_language.to_string(),
        payload: merged,
    })
}

/// Steps 5-7 of the translation flow: one transaction covering the recipe
/// row, catalog resolution, and both join tables.
fn persist_translation(
    conn: &mut PgConnection,
    source: &Recipe,
    source_shopping: &[(ShoppingItem, NormalizedEntry)],
    merged: &RecipePayload,
    target_language: &str,
) -> Result<Uuid, diesel::result::Error> {
    let root_id = family::root_id(source);
    let steps_json = serde_json::Value::Array(
        merged
            .steps
            .iter()
            .map(|step| serde_json::Value::String(step.clone()))
            .collect(),
    );

    conn.transaction(|conn| {
        let new_id: Uuid = diesel::insert_into(recipes::table)
            .values(&NewRecipe {
                kitchen_id: source.kitchen_id,
                original_recipe_id: Some(root_id),
                language: target_language,
                recipe_title: &merged.recipe_title,
                reasoning: &merged.reasoning,
                steps: steps_json,
                analysis_log: &merged.analysis_log,
                is_safe: merged.is_safe,
                meal_type: &merged.meal_type,
                difficulty: &merged.difficulty,
                prep_time: &merged.prep_time,
                dish_image: source.dish_image.as_deref(),
            })
            .returning(recipes::id)
            .get_result(conn)?;

        for entry in &merged.ingredients_from_pantry {
            let ingredient =
                catalog::resolve_or_create_ingredient(conn, source.kitchen_id, &entry.name)?;
            diesel::insert_into(recipe_ingredients::table)
                .values(&NewRecipeIngredient {
                    recipe_id: new_id,
                    ingredient_id: ingredient.id,
                    in_pantry: true,
                    quantity: &entry.quantity,
                    unit: &entry.unit,
                    amount: &concat_amount(&entry.quantity, &entry.unit),
                })
                .execute(conn)?;
        }

        for (index, entry) in merged.shopping_list.iter().enumerate() {
            // Pair translated entries with source catalog rows by position;
            // the translator is instructed to preserve array order.
            let original_id = source_shopping.get(index).map(|(item, _)| item.id);
            let item = catalog::resolve_or_create_shopping_item(
                conn,
                source.kitchen_id,
                &entry.name,
                ShoppingExtra {
                    quantity: &entry.quantity,
                    unit: &entry.unit,
                    original_shopping_item_id: original_id,
                },
            )?;
            diesel::insert_into(recipe_shopping_items::table)
                .values(&NewRecipeShoppingItem {
                    recipe_id: new_id,
                    shopping_item_id: item.id,
                })
                .execute(conn)?;
        }

        Ok(new_id)
    })
}

/// Merge the translator's untrusted output over the source payload: blank
/// scalars and emptied arrays fall back to the source values. The safety
/// flag is never taken from the translator.
fn apply_translation(source: &RecipePayload, translated: RecipePayload) -> (RecipePayload, Fallbacks) {
    let mut fallbacks = Fallbacks::default();

    let shopping_list = if translated.shopping_list.is_empty() && !source.shopping_list.is_empty() {
        fallbacks.shopping_list = true;
        source.shopping_list.clone()
    } else {
        translated.shopping_list
    };

    let ingredients_from_pantry = if translated.ingredients_from_pantry.is_empty()
        && !source.ingredients_from_pantry.is_empty()
    {
        fallbacks.pantry = true;
        source.ingredients_from_pantry.clone()
    } else {
        translated.ingredients_from_pantry
    };

    let merged = RecipePayload {
        recipe_title: or_source(translated.recipe_title, &source.recipe_title),
        reasoning: or_source(translated.reasoning, &source.reasoning),
        steps: if translated.steps.is_empty() {
            source.steps.clone()
        } else {
            translated.steps
        },
        analysis_log: or_source(translated.analysis_log, &source.analysis_log),
        is_safe: source.is_safe,
        meal_type: or_source(translated.meal_type, &source.meal_type),
        difficulty: or_source(translated.difficulty, &source.difficulty),
        prep_time: or_source(translated.prep_time, &source.prep_time),
        ingredients_from_pantry,
        shopping_list,
    };

    (merged, fallbacks)
}

fn or_source(translated: String, source: &str) -> String {
    if translated.trim().is_empty() {
        source.to_string()
    } else {
        translated
    }
}

/// Join-level quantity and unit concatenated for display compatibility.
fn concat_amount(quantity: &str, unit: &str) -> String {
    format!("{quantity} {unit}").trim().to_string()
}

pub fn build_payload(
    recipe: &Recipe,
    pantry: Vec<NormalizedEntry>,
    shopping: Vec<NormalizedEntry>,
) -> RecipePayload {
    RecipePayload {
        recipe_title: recipe.recipe_title.clone(),
        reasoning: recipe.reasoning.clone(),
        steps: steps_of(recipe),
        analysis_log: recipe.analysis_log.clone(),
        is_safe: recipe.is_safe,
        meal_type: recipe.meal_type.clone(),
        difficulty: recipe.difficulty.clone(),
        prep_time: recipe.prep_time.clone(),
        ingredients_from_pantry: pantry,
        shopping_list: shopping,
    }
}

/// Stored steps are a JSONB array of strings; anything else in legacy rows is
/// skipped rather than surfaced.
pub fn steps_of(recipe: &Recipe) -> Vec<String> {
    recipe
        .steps
        .as_array()
        .map(|steps| {
            steps
                .iter()
                .filter_map(|step| step.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// The source recipe's pantry ingredients with join-level quantity/unit,
/// run through the read-side unwrap.
pub fn load_pantry_entries(
    conn: &mut PgConnection,
    recipe_id: Uuid,
) -> QueryResult<Vec<NormalizedEntry>> {
    let rows: Vec<(String, String, String)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq(recipe_id))
        .filter(recipe_ingredients::in_pantry.eq(true))
        .select((
            ingredients::name,
            recipe_ingredients::quantity,
            recipe_ingredients::unit,
        ))
        .load(conn)?;

    Ok(rows
        .iter()
        .map(|(name, quantity, unit)| display_entry(name, quantity, unit))
        .collect())
}

/// The recipe's shopping items, each paired with its display entry. The
/// catalog rows themselves are kept so translation can link counterpart rows
/// back to their source ids.
pub fn load_shopping_items(
    conn: &mut PgConnection,
    recipe_id: Uuid,
) -> QueryResult<Vec<(ShoppingItem, NormalizedEntry)>> {
    let rows: Vec<ShoppingItem> = recipe_shopping_items::table
        .inner_join(shopping_items::table)
        .filter(recipe_shopping_items::recipe_id.eq(recipe_id))
        .select(ShoppingItem::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|item| {
            let entry = display_entry(&item.name, &item.quantity, &item.unit);
            (item, entry)
        })
        .collect())
}

fn entries_of(items: &[(ShoppingItem, NormalizedEntry)]) -> Vec<NormalizedEntry> {
    items.iter().map(|(_, entry)| entry.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::FakeTranslator;

    fn entry(name: &str, quantity: &str, unit: &str) -> NormalizedEntry {
        NormalizedEntry {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        }
    }

    fn source_payload() -> RecipePayload {
        RecipePayload {
            recipe_title: "Roast chicken".to_string(),
            reasoning: "Uses up the pantry".to_string(),
            steps: vec!["Season".to_string(), "Roast".to_string()],
            analysis_log: "generated 2026-07-01".to_string(),
            is_safe: true,
            meal_type: "dinner".to_string(),
            difficulty: "easy".to_string(),
            prep_time: "20 min".to_string(),
            ingredients_from_pantry: vec![entry("Chicken", "1", "whole")],
            shopping_list: vec![entry("Carrots", "2", "pcs")],
        }
    }

    #[test]
    fn test_concat_amount() {
        assert_eq!(concat_amount("2", "pcs"), "2 pcs");
        assert_eq!(concat_amount("", "pcs"), "pcs");
        assert_eq!(concat_amount("3", ""), "3");
        assert_eq!(concat_amount("", ""), "");
    }

    #[test]
    fn test_empty_shopping_list_falls_back_to_source() {
        let source = source_payload();
        let mut translated = source.clone();
        translated.recipe_title = "Frango assado".to_string();
        translated.shopping_list = vec![];

        let (merged, fallbacks) = apply_translation(&source, translated);
        assert!(fallbacks.shopping_list);
        assert_eq!(merged.shopping_list, vec![entry("Carrots", "2", "pcs")]);
        assert_eq!(merged.recipe_title, "Frango assado");
    }

    #[test]
    fn test_empty_pantry_falls_back_to_source() {
        let source = source_payload();
        let mut translated = source.clone();
        translated.ingredients_from_pantry = vec![];

        let (merged, fallbacks) = apply_translation(&source, translated);
        assert!(fallbacks.pantry);
        assert_eq!(
            merged.ingredients_from_pantry,
            vec![entry("Chicken", "1", "whole")]
        );
    }

    #[test]
    fn test_translated_arrays_kept_when_present() {
        let source = source_payload();
        let mut translated = source.clone();
        translated.shopping_list = vec![entry("Cenouras", "2", "pcs")];
        translated.ingredients_from_pantry = vec![entry("Frango", "1", "inteiro")];

        let (merged, fallbacks) = apply_translation(&source, translated);
        assert_eq!(fallbacks, Fallbacks::default());
        assert_eq!(merged.shopping_list[0].name, "Cenouras");
        assert_eq!(merged.ingredients_from_pantry[0].name, "Frango");
    }

    #[test]
    fn test_blank_scalars_fall_back_to_source() {
        let source = source_payload();
        let mut translated = source.clone();
        translated.analysis_log = String::new();
        translated.prep_time = "  ".to_string();
        translated.steps = vec![];

        let (merged, _) = apply_translation(&source, translated);
        assert_eq!(merged.analysis_log, "generated 2026-07-01");
        assert_eq!(merged.prep_time, "20 min");
        assert_eq!(merged.steps, source.steps);
    }

    #[test]
    fn test_safety_flag_never_taken_from_translator() {
        let source = source_payload();
        let mut translated = source.clone();
        translated.is_safe = false;

        let (merged, _) = apply_translation(&source, translated);
        assert!(merged.is_safe);
    }

    #[tokio::test]
    async fn test_fake_translator_round_trip_with_fallback() {
        let source = source_payload();
        let mut canned = source.clone();
        canned.recipe_title = "Frango assado".to_string();
        canned.shopping_list = vec![];
        let translator = FakeTranslator::with_response("pt-BR", canned);

        let translated = translator.translate(&source, "pt-BR").await.unwrap();
        let (merged, fallbacks) = apply_translation(&source, translated);
        assert!(fallbacks.shopping_list);
        assert_eq!(merged.recipe_title, "Frango assado");
        assert_eq!(merged.shopping_list[0].name, "Carrots");
    }

    #[tokio::test]
    async fn test_failing_translator_propagates() {
        let translator = FakeTranslator::failing("boom");
        let result = translator.translate(&source_payload(), "fr").await;
        assert!(matches!(result, Err(TranslatorError::RequestFailed(_))));
    }
}
