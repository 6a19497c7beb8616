//! User administration routes. All of them sit behind the admin guard.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use domain::models::Role;
use persistence::entities::UserWithCountsEntity;
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// A user row in the admin listing, with activity counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub ticket_count: i64,
    pub comment_count: i64,
}

impl From<UserWithCountsEntity> for UserSummary {
    fn from(entity: UserWithCountsEntity) -> Self {
        let role = entity.role();
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            role,
            created_at: entity.created_at,
            ticket_count: entity.ticket_count,
            comment_count: entity.comment_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
}

/// Request body for changing a user's role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedRoleResponse {
    pub message: String,
    pub user: domain::models::User,
}

/// List all accounts with their ticket and comment counts.
///
/// GET /api/users (admin)
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = UserRepository::new(state.pool.clone())
        .list_with_counts()
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(Json(UserListResponse { users }))
}

/// Promote or demote an account.
///
/// Role changes only affect tokens issued afterwards, so the new role
/// takes effect at the target's next login.
///
/// PATCH /api/users/:id/role (admin)
pub async fn update_user_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<UpdatedRoleResponse>, ApiError> {
    let role = Role::from_str(&request.role)
        .map_err(|_| ApiError::Validation(format!("Invalid role: {}", request.role)))?;

    if id == auth.user_id {
        return Err(ApiError::SelfRoleChange("Cannot change your own role".into()));
    }

    let entity = UserRepository::new(state.pool.clone())
        .set_role(id, role)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    tracing::info!(user_id = %id, role = %request.role, "User role updated");

    Ok(Json(UpdatedRoleResponse {
        message: "Role updated. The change takes effect at the user's next login".to_string(),
        user: entity.into(),
    }))
}

/// Delete an account along with its tickets and comments.
///
/// DELETE /api/users/:id (admin)
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = UserRepository::new(state.pool.clone()).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".into()));
    }

    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(
        serde_json::json!({ "message": "User deleted successfully" }),
    ))
}
