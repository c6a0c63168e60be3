use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::{Recipe, ShoppingItem};
use crate::recipes::family::{self, TranslationOption};
use crate::recipes::normalize::{display_entry, NormalizedEntry};
use crate::recipes::translate::steps_of;
use crate::schema::{
    favorite_recipes, ingredients, recipe_ingredients, recipe_shopping_items, recipes,
    shopping_items,
};
use crate::tenant::TenantContext;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Requested display language. Each recipe family contributes one list
    /// item: the variant in this language when one exists, else the root.
    pub lang: Option<String>,
}

/// One recipe family, represented by its display variant.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeListItem {
    pub id: Uuid,
    pub language: String,
    pub recipe_title: String,
    pub reasoning: String,
    pub steps: Vec<String>,
    pub is_safe: bool,
    pub meal_type: String,
    pub difficulty: String,
    pub prep_time: String,
    pub dish_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_favorite: bool,
    /// Sibling language variants, for the client-side language switcher.
    pub translations: Vec<TranslationOption>,
    pub ingredients_from_pantry: Vec<NormalizedEntry>,
    pub shopping_list: Vec<NormalizedEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeListItem>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Recipe families for the kitchen", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not a kitchen member", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    tenant: TenantContext,
    State(state): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let lang = params.lang.unwrap_or_else(|| "en".to_string());
    let mut conn = get_conn!(state);

    let rows: Vec<Recipe> = match recipes::table
        .filter(recipes::kitchen_id.eq(tenant.kitchen_id))
        .order(recipes::created_at.desc())
        .select(Recipe::as_select())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to load recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let families = family::group_into_families(rows);
    let mut selected: Vec<(Recipe, Vec<TranslationOption>)> = Vec::with_capacity(families.len());
    for members in &families {
        if let Some(variant) = family::select_variant(members, &lang) {
            let options = family::translation_options(members, variant.id);
            selected.push((variant.clone(), options));
        }
    }

    let selected_ids: Vec<Uuid> = selected.iter().map(|(recipe, _)| recipe.id).collect();

    let favorites: HashSet<Uuid> = match favorite_recipes::table
        .filter(favorite_recipes::member_id.eq(tenant.member_id))
        .filter(favorite_recipes::recipe_id.eq_any(&selected_ids))
        .select(favorite_recipes::recipe_id)
        .load::<Uuid>(&mut conn)
    {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            tracing::error!("Failed to load favorites: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    // One query per join table for the whole page, grouped in memory.
    let pantry_rows: Vec<(Uuid, String, String, String)> = match recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&selected_ids))
        .filter(recipe_ingredients::in_pantry.eq(true))
        .select((
            recipe_ingredients::recipe_id,
            ingredients::name,
            recipe_ingredients::quantity,
            recipe_ingredients::unit,
        ))
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to load recipe ingredients: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let shopping_rows: Vec<(Uuid, ShoppingItem)> = match recipe_shopping_items::table
        .inner_join(shopping_items::table)
        .filter(recipe_shopping_items::recipe_id.eq_any(&selected_ids))
        .select((recipe_shopping_items::recipe_id, ShoppingItem::as_select()))
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to load shopping items: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut pantry_by_recipe: HashMap<Uuid, Vec<NormalizedEntry>> = HashMap::new();
    for (recipe_id, name, quantity, unit) in &pantry_rows {
        pantry_by_recipe
            .entry(*recipe_id)
            .or_default()
            .push(display_entry(name, quantity, unit));
    }

    let mut shopping_by_recipe: HashMap<Uuid, Vec<NormalizedEntry>> = HashMap::new();
    for (recipe_id, item) in &shopping_rows {
        shopping_by_recipe
            .entry(*recipe_id)
            .or_default()
            .push(display_entry(&item.name, &item.quantity, &item.unit));
    }

    let items: Vec<RecipeListItem> = selected
        .into_iter()
        .map(|(recipe, translations)| RecipeListItem {
            steps: steps_of(&recipe),
            is_favorite: favorites.contains(&recipe.id),
            translations,
            ingredients_from_pantry: pantry_by_recipe.remove(&recipe.id).unwrap_or_default(),
            shopping_list: shopping_by_recipe.remove(&recipe.id).unwrap_or_default(),
            id: recipe.id,
            language: recipe.language,
            recipe_title: recipe.recipe_title,
            reasoning: recipe.reasoning,
            is_safe: recipe.is_safe,
            meal_type: recipe.meal_type,
            difficulty: recipe.difficulty,
            prep_time: recipe.prep_time,
            dish_image: recipe.dish_image,
            created_at: recipe.created_at,
        })
        .collect();

    Json(ListRecipesResponse { recipes: items }).into_response()
}
