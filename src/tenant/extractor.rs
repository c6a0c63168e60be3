use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::api::ErrorResponse;
use crate::AppState;

use super::membership::member_id_for;

/// The resolved identity for one request: who is asking, which kitchen they
/// are acting in, and their membership row in that kitchen. Extraction fails
/// with 401 when the gateway headers are missing or malformed and 403 when
/// the user is not a member of the kitchen.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext {
    pub user_id: Uuid,
    pub kitchen_id: Uuid,
    pub member_id: Uuid,
}

const USER_HEADER: &str = "x-user-id";
const KITCHEN_HEADER: &str = "x-kitchen-id";

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn header_uuid(parts: &Parts, name: &str) -> Result<Uuid, Response> {
    let raw = parts
        .headers
        .get(name)
        .ok_or_else(|| unauthorized(&format!("Missing {name} header")))?;
    let raw = raw
        .to_str()
        .map_err(|_| unauthorized(&format!("Invalid {name} header")))?;
    Uuid::parse_str(raw).map_err(|_| unauthorized(&format!("Invalid {name} header")))
}

impl FromRequestParts<AppState> for TenantContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = header_uuid(parts, USER_HEADER)?;
        let kitchen_id = header_uuid(parts, KITCHEN_HEADER)?;

        let mut conn = state.pool.get().map_err(|e| {
            tracing::error!("Failed to get database connection: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database connection failed".to_string(),
                }),
            )
                .into_response()
        })?;

        let member_id = member_id_for(&mut conn, user_id, kitchen_id)
            .map_err(|e| {
                tracing::error!("Membership lookup failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Membership lookup failed".to_string(),
                    }),
                )
                    .into_response()
            })?
            .ok_or_else(|| {
                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorResponse {
                        error: "Not a member of this kitchen".to_string(),
                    }),
                )
                    .into_response()
            })?;

        Ok(TenantContext {
            user_id,
            kitchen_id,
            member_id,
        })
    }
}
