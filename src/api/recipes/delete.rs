use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Recipe;
use crate::recipes::family::RecipeRole;
use crate::schema::{favorite_recipes, recipe_ingredients, recipe_shopping_items, recipes};
use crate::tenant::TenantContext;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted; deleting a root deletes its translations too"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
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
                    error: "Failed to delete recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    // Deleting a root takes its translations with it so no translation is
    // ever left pointing at a missing root. Deleting a translation removes
    // only that variant. Catalog rows stay either way.
    let result: Result<(), diesel::result::Error> = conn.transaction(|conn| {
        let mut doomed: Vec<Uuid> = vec![recipe.id];
        if RecipeRole::of(&recipe) == RecipeRole::Root {
            let translation_ids: Vec<Uuid> = recipes::table
                .filter(recipes::original_recipe_id.eq(recipe.id))
                .select(recipes::id)
                .load(conn)?;
            doomed.extend(translation_ids);
        }

        diesel::delete(favorite_recipes::table.filter(favorite_recipes::recipe_id.eq_any(&doomed)))
            .execute(conn)?;
        diesel::delete(
            recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq_any(&doomed)),
        )
        .execute(conn)?;
        diesel::delete(
            recipe_shopping_items::table.filter(recipe_shopping_items::recipe_id.eq_any(&doomed)),
        )
        .execute(conn)?;

        // Translations first, then the root, to satisfy the self-reference.
        diesel::delete(recipes::table.filter(recipes::original_recipe_id.eq(recipe.id)))
            .execute(conn)?;
        diesel::delete(recipes::table.find(recipe.id)).execute(conn)?;

        Ok(())
    });

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Failed to delete recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
