//! Authentication routes for registration and login.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain::models::User;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::auth::{AuthService, RegisterInput};

/// Request body for user registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(custom(function = "shared::validation::validate_name"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_password"))]
    pub password: String,

    /// Optional code granting the admin role at registration.
    pub admin_code: Option<String>,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response body for both auth flows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Register a new user.
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let service = AuthService::new(
        state.pool.clone(),
        &state.config.jwt,
        state.config.auth.admin_registration_code.clone(),
    )?;

    let (user, token) = service
        .register(RegisterInput {
            name: request.name,
            email: request.email,
            password: request.password,
            admin_code: request.admin_code,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// Log in with email and password.
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let service = AuthService::new(
        state.pool.clone(),
        &state.config.jwt,
        state.config.auth.admin_registration_code.clone(),
    )?;

    let (user, token) = service.login(&request.email, &request.password).await?;

    Ok(Json(AuthResponse { user, token }))
}
