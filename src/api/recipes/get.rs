use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Recipe;
use crate::recipes::family::{self, TranslationOption};
use crate::recipes::normalize::NormalizedEntry;
use crate::recipes::translate::{load_pantry_entries, load_shopping_items, steps_of};
use crate::schema::{favorite_recipes, recipes};
use crate::tenant::TenantContext;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub language: String,
    pub recipe_title: String,
    pub reasoning: String,
    pub steps: Vec<String>,
    pub analysis_log: String,
    pub is_safe: bool,
    pub meal_type: String,
    pub difficulty: String,
    pub prep_time: String,
    pub dish_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub translations: Vec<TranslationOption>,
    pub ingredients_from_pantry: Vec<NormalizedEntry>,
    pub shopping_list: Vec<NormalizedEntry>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    let recipe: Recipe = match recipes::table
        .find(id)
        .filter(recipes::kitchen_id.eq(tenant.kitchen_id))
        .select(Recipe::as_select())
        .first(&mut conn)
    {
        Ok(recipe) => recipe,
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to load recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    let root_id = family::root_id(&recipe);
    let members: Vec<Recipe> = match recipes::table
        .filter(recipes::kitchen_id.eq(tenant.kitchen_id))
        .filter(
            recipes::id
                .eq(root_id)
                .or(recipes::original_recipe_id.eq(root_id)),
        )
        .order(recipes::created_at.desc())
        .select(Recipe::as_select())
        .load(&mut conn)
    {
        Ok(members) => members,
        Err(e) => {
            tracing::error!("Failed to load recipe family: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load recipe".to_string(),
                }),
            )
                .into_response();
        }
    };
    let translations = family::translation_options(&members, recipe.id);

    let pantry = match load_pantry_entries(&mut conn, recipe.id) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Failed to load recipe ingredients: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    let shopping = match load_shopping_items(&mut conn, recipe.id) {
        Ok(items) => items.into_iter().map(|(_, entry)| entry).collect(),
        Err(e) => {
            tracing::error!("Failed to load shopping items: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    let is_favorite = match favorite_recipes::table
        .filter(favorite_recipes::member_id.eq(tenant.member_id))
        .filter(favorite_recipes::recipe_id.eq(recipe.id))
        .select(favorite_recipes::id)
        .first::<Uuid>(&mut conn)
        .optional()
    {
        Ok(row) => row.is_some(),
        Err(e) => {
            tracing::error!("Failed to load favorite: {}", e);
            false
        }
    };

    Json(RecipeResponse {
        steps: steps_of(&recipe),
        id: recipe.id,
        language: recipe.language,
        recipe_title: recipe.recipe_title,
        reasoning: recipe.reasoning,
        analysis_log: recipe.analysis_log,
        is_safe: recipe.is_safe,
        meal_type: recipe.meal_type,
        difficulty: recipe.difficulty,
        prep_time: recipe.prep_time,
        dish_image: recipe.dish_image,
        created_at: recipe.created_at,
        updated_at: recipe.updated_at,
        is_favorite,
        translations,
        ingredients_from_pantry: pantry,
        shopping_list: shopping,
    })
    .into_response()
}
