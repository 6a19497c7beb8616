//! JWT authentication and role-guard middleware.
//!
//! `require_auth` validates the bearer token and stores the caller's
//! identity in request extensions. `require_admin` runs after it and
//! rejects callers whose token role is not admin. The role is read from
//! the token claim, never from the database, so a role change only takes
//! effect once the user logs in again.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::str::FromStr;
use uuid::Uuid;

use domain::models::Role;
use shared::jwt::JwtConfig;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use crate::error::ApiError;

/// Authenticated caller identity extracted from the JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// Role claim as issued at login.
    pub role: Role,
    /// JWT ID (jti) for log correlation.
    pub jti: String,
}

impl AuthUser {
    /// Validates an access token and returns the caller's identity.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt_config
            .validate_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| "Invalid user ID in token".to_string())?;

        let role =
            Role::from_str(&claims.role).map_err(|_| "Invalid role in token".to_string())?;

        Ok(AuthUser {
            user_id,
            role,
            jti: claims.jti,
        })
    }

    /// Creates a JwtConfig from the application's JWT settings.
    pub fn create_jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, String> {
        JwtConfig::with_leeway(
            &config.private_key,
            &config.public_key,
            config.token_expiry_secs,
            config.leeway_secs,
        )
        .map_err(|e| format!("Failed to initialize JWT config: {}", e))
    }
}

/// Middleware that requires a valid bearer token.
///
/// Stores the [`AuthUser`] in request extensions for downstream handlers
/// and guards.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return ApiError::Unauthorized("Missing or invalid Authorization header".into())
                .into_response();
        }
    };

    let jwt_config = match AuthUser::create_jwt_config(&state.config.jwt) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to create JWT config: {}", e);
            return ApiError::Internal("Authentication service unavailable".into())
                .into_response();
        }
    };

    match AuthUser::validate(&jwt_config, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            ApiError::Unauthorized("Invalid or expired token".into()).into_response()
        }
    }
}

/// Middleware that requires the token role to be admin.
///
/// Must be layered inside `require_auth` so the identity is already in
/// request extensions.
pub async fn require_admin(req: Request<Body>, next: Next) -> Response {
    match req.extensions().get::<AuthUser>() {
        Some(auth) if auth.role.is_admin() => next.run(req).await,
        Some(_) => ApiError::Forbidden("Admin access required".into()).into_response(),
        None => {
            ApiError::Unauthorized("Missing or invalid Authorization header".into())
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_auth_user_clone() {
        let auth = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
            jti: "jti-1".to_string(),
        };
        let cloned = auth.clone();
        assert_eq!(auth.user_id, cloned.user_id);
        assert_eq!(auth.role, cloned.role);
        assert_eq!(auth.jti, cloned.jti);
    }

    #[test]
    fn test_create_jwt_config_rejects_bad_keys() {
        let config = JwtAuthConfig {
            private_key: "not a pem".to_string(),
            public_key: "not a pem".to_string(),
            token_expiry_secs: 3600,
            leeway_secs: 0,
        };
        assert!(AuthUser::create_jwt_config(&config).is_err());
    }

    #[test]
    fn test_unauthorized_error_status() {
        let response =
            ApiError::Unauthorized("Missing or invalid Authorization header".into())
                .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
