//! Registration and login.
//!
//! Issues the access token at the end of both flows; the token carries the
//! role the account had at that moment and keeps it until the next login.

use sqlx::PgPool;

use domain::models::{Role, User};
use persistence::repositories::UserRepository;
use shared::jwt::JwtConfig;
use shared::password::{hash_password, verify_password};

use crate::config::JwtAuthConfig;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::metrics::record_user_registered;

/// Validated registration input. Field checks happen at the route layer;
/// this service owns the account-level rules.
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub admin_code: Option<String>,
}

/// Authentication service over the user repository.
pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
    admin_registration_code: String,
}

impl AuthService {
    pub fn new(
        pool: PgPool,
        jwt: &JwtAuthConfig,
        admin_registration_code: String,
    ) -> Result<Self, ApiError> {
        let jwt = AuthUser::create_jwt_config(jwt).map_err(ApiError::Internal)?;
        Ok(Self {
            users: UserRepository::new(pool),
            jwt,
            admin_registration_code,
        })
    }

    /// Registers a new account and returns it with a fresh access token.
    ///
    /// A correct admin code registers the account as admin; a wrong one is
    /// rejected outright rather than silently downgraded.
    pub async fn register(&self, input: RegisterInput) -> Result<(User, String), ApiError> {
        let role = resolve_role(input.admin_code.as_deref(), &self.admin_registration_code)?;

        let email = input.email.trim().to_lowercase();
        if self.users.email_exists(&email).await? {
            return Err(ApiError::Validation("Email already registered".into()));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

        let entity = self
            .users
            .create(input.name.trim(), &email, &password_hash, role)
            .await?;
        let user: User = entity.into();

        let (token, _jti) = self
            .jwt
            .generate_token(user.id, user.role.as_str())
            .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

        record_user_registered();
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok((user, token))
    }

    /// Verifies credentials and returns the account with a fresh token.
    ///
    /// An unknown email and a wrong password fail differently (404 vs 401);
    /// the split is part of the API contract.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), ApiError> {
        let entity = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

        let valid = verify_password(password, &entity.password_hash)
            .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(ApiError::Unauthorized("Invalid password".into()));
        }

        let user: User = entity.into();
        let (token, _jti) = self
            .jwt
            .generate_token(user.id, user.role.as_str())
            .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok((user, token))
    }
}

/// Decides the role for a new registration from the optional admin code.
///
/// No code (or an empty string) registers a regular user. With a configured
/// code, a match registers an admin and a mismatch is a validation error.
/// An empty configured code disables admin self-registration.
fn resolve_role(admin_code: Option<&str>, configured_code: &str) -> Result<Role, ApiError> {
    match admin_code {
        None => Ok(Role::User),
        Some("") => Ok(Role::User),
        Some(code) => {
            if !configured_code.is_empty() && code == configured_code {
                Ok(Role::Admin)
            } else {
                Err(ApiError::Validation("Invalid admin code".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_role_no_code() {
        assert_eq!(resolve_role(None, "secret").unwrap(), Role::User);
    }

    #[test]
    fn test_resolve_role_empty_code() {
        assert_eq!(resolve_role(Some(""), "secret").unwrap(), Role::User);
    }

    #[test]
    fn test_resolve_role_correct_code() {
        assert_eq!(resolve_role(Some("secret"), "secret").unwrap(), Role::Admin);
    }

    #[test]
    fn test_resolve_role_wrong_code_rejected() {
        let result = resolve_role(Some("guess"), "secret");
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_resolve_role_disabled_when_unconfigured() {
        // With no configured code, any supplied code is wrong.
        let result = resolve_role(Some("anything"), "");
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
