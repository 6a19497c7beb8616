//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::Role;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserEntity {
    /// Parses the stored role string. The column has a CHECK constraint,
    /// so an unparseable value means a broken migration; fall back to the
    /// least-privileged role rather than panic.
    pub fn role(&self) -> Role {
        Role::from_str(&self.role).unwrap_or(Role::User)
    }
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        let role = entity.role();
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            password_hash: entity.password_hash,
            role,
            created_at: entity.created_at,
        }
    }
}

/// User row joined with owned-ticket and authored-comment counts,
/// for the admin user listing.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithCountsEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub ticket_count: i64,
    pub comment_count: i64,
}

impl UserWithCountsEntity {
    /// Same parse-with-fallback as [`UserEntity::role`].
    pub fn role(&self) -> Role {
        Role::from_str(&self.role).unwrap_or(Role::User)
    }
}
