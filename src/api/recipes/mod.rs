pub mod delete;
pub mod get;
pub mod list;
pub mod translate;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes))
        .route(
            "/{id}",
            get(get::get_recipe).delete(delete::delete_recipe),
        )
        .route("/{id}/translate", post(translate::translate_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        get::get_recipe,
        translate::translate_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        list::ListRecipesResponse,
        list::RecipeListItem,
        get::RecipeResponse,
        translate::TranslateRecipeRequest,
        translate::TranslateRecipeResponse,
        crate::recipes::family::TranslationOption,
        crate::translator::RecipePayload,
    ))
)]
pub struct ApiDoc;
