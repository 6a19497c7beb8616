//! Ticket comment domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::Role;

/// A comment on a ticket. Comments are immutable once created and can only
/// be added while the parent ticket is open.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Comment author identity returned with each comment. The role lets the
/// client render staff replies distinctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_serializes_camel_case() {
        let comment = Comment {
            id: Uuid::new_v4(),
            content: "Looking into it".to_string(),
            ticket_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&comment).unwrap();
        assert!(json.contains("ticketId"));
        assert!(json.contains("userId"));
        assert!(json.contains("createdAt"));
    }

    #[test]
    fn test_comment_author_includes_role() {
        let author = CommentAuthor {
            id: Uuid::new_v4(),
            name: "Support Staff".to_string(),
            role: Role::Admin,
        };

        let json = serde_json::to_string(&author).unwrap();
        assert!(json.contains("\"role\":\"admin\""));
    }
}
