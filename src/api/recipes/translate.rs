use crate::api::ErrorResponse;
use crate::get_conn;
use crate::recipes::translate::{self, TranslateError};
use crate::tenant::TenantContext;
use crate::translator::RecipePayload;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TranslateRecipeRequest {
    /// Target locale tag, e.g. "pt-BR".
    #[serde(rename = "targetLanguage", default)]
    pub target_language: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TranslateRecipeResponse {
    pub id: Uuid,
    pub language: String,
    #[serde(flatten)]
    pub recipe: RecipePayload,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/translate",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = TranslateRecipeRequest,
    responses(
        (status = 201, description = "Translated recipe", body = TranslateRecipeResponse),
        (status = 400, description = "Missing target language", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Translation failed", body = ErrorResponse)
    )
)]
pub async fn translate_recipe(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TranslateRecipeRequest>,
) -> impl IntoResponse {
    let target_language = request.target_language.unwrap_or_default();
    let mut conn = get_conn!(state);

    let result = translate::translate_recipe(
        &mut conn,
        state.translator.as_ref(),
        tenant.kitchen_id,
        id,
        &target_language,
    )
    .await;

    match result {
        Ok(view) => (
            StatusCode::CREATED,
            Json(TranslateRecipeResponse {
                id: view.id,
                language: view.language,
                recipe: view.payload,
            }),
        )
            .into_response(),
        Err(TranslateError::MissingTargetLanguage) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "targetLanguage is required".to_string(),
            }),
        )
            .into_response(),
        Err(TranslateError::RecipeNotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        Err(TranslateError::Translator(e)) => {
            tracing::error!("Translation provider failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Translation failed".to_string(),
                }),
            )
                .into_response()
        }
        Err(TranslateError::Database(e)) => {
            tracing::error!("Failed to save translation: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to save translation".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_field_is_camel_case() {
        let request: TranslateRecipeRequest =
            serde_json::from_str(r#"{"targetLanguage":"pt-BR"}"#).unwrap();
        assert_eq!(request.target_language.as_deref(), Some("pt-BR"));
    }

    #[test]
    fn test_missing_target_language_deserializes_to_none() {
        let request: TranslateRecipeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.target_language.is_none());
    }
}
