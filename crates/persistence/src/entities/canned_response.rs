//! Canned response entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::CannedResponse;

/// Database row mapping for the canned_responses table.
#[derive(Debug, Clone, FromRow)]
pub struct CannedResponseEntity {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<CannedResponseEntity> for CannedResponse {
    fn from(entity: CannedResponseEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            content: entity.content,
            created_at: entity.created_at,
        }
    }
}
