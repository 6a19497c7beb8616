//! Canned response routes. Reusable reply templates for staff.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::CannedResponse;
use persistence::repositories::CannedResponseRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Request body for creating or replacing a template.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CannedResponseRequest {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CannedResponseListResponse {
    pub responses: Vec<CannedResponse>,
}

#[derive(Debug, Serialize)]
pub struct CannedResponseBody {
    pub response: CannedResponse,
}

fn ensure_admin(auth: &AuthUser) -> Result<(), ApiError> {
    if auth.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".into()))
    }
}

/// List all templates. Any authenticated user may read them.
///
/// GET /api/canned-responses
pub async fn list_canned_responses(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<CannedResponseListResponse>, ApiError> {
    let responses = CannedResponseRepository::new(state.pool.clone())
        .list()
        .await?
        .into_iter()
        .map(CannedResponse::from)
        .collect();

    Ok(Json(CannedResponseListResponse { responses }))
}

/// Create a template.
///
/// POST /api/canned-responses (admin)
pub async fn create_canned_response(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CannedResponseRequest>,
) -> Result<(StatusCode, Json<CannedResponseBody>), ApiError> {
    ensure_admin(&auth)?;
    request.validate()?;

    let entity = CannedResponseRepository::new(state.pool.clone())
        .create(request.title.trim(), request.content.trim())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CannedResponseBody {
            response: entity.into(),
        }),
    ))
}

/// Replace a template's title and content.
///
/// PUT /api/canned-responses/:id (admin)
pub async fn update_canned_response(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CannedResponseRequest>,
) -> Result<Json<CannedResponseBody>, ApiError> {
    ensure_admin(&auth)?;
    request.validate()?;

    let entity = CannedResponseRepository::new(state.pool.clone())
        .update(id, request.title.trim(), request.content.trim())
        .await?
        .ok_or_else(|| ApiError::NotFound("Canned response not found".into()))?;

    Ok(Json(CannedResponseBody {
        response: entity.into(),
    }))
}

/// Delete a template.
///
/// DELETE /api/canned-responses/:id (admin)
pub async fn delete_canned_response(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_admin(&auth)?;

    let deleted = CannedResponseRepository::new(state.pool.clone())
        .delete(id)
        .await?;
    if !deleted {
        return Err(ApiError::NotFound("Canned response not found".into()));
    }

    Ok(Json(
        serde_json::json!({ "message": "Canned response deleted successfully" }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::Role;

    #[test]
    fn test_blank_title_rejected() {
        let request = CannedResponseRequest {
            title: " ".to_string(),
            content: "Thanks for reaching out!".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_blank_content_rejected() {
        let request = CannedResponseRequest {
            title: "Greeting".to_string(),
            content: "".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_ensure_admin() {
        let admin = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
            jti: "jti".to_string(),
        };
        let user = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::User,
            jti: "jti".to_string(),
        };

        assert!(ensure_admin(&admin).is_ok());
        assert!(matches!(ensure_admin(&user), Err(ApiError::Forbidden(_))));
    }
}
