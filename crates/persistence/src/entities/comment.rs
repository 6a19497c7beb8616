//! Comment entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::{Comment, CommentAuthor, Role};

/// Database row mapping for the comments table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentEntity {
    pub id: Uuid,
    pub content: String,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<CommentEntity> for Comment {
    fn from(entity: CommentEntity) -> Self {
        Self {
            id: entity.id,
            content: entity.content,
            ticket_id: entity.ticket_id,
            user_id: entity.user_id,
            created_at: entity.created_at,
        }
    }
}

/// Comment row joined with its author's name and role.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorEntity {
    pub id: Uuid,
    pub content: String,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_role: String,
}

impl CommentWithAuthorEntity {
    pub fn author(&self) -> CommentAuthor {
        CommentAuthor {
            id: self.user_id,
            name: self.author_name.clone(),
            role: Role::from_str(&self.author_role).unwrap_or(Role::User),
        }
    }
}
