//! Comment repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CommentWithAuthorEntity;
use crate::metrics::QueryTimer;

/// Repository for comment-related database operations.
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Creates a new CommentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a comment and return it joined with the author's name and
    /// role. The CTE keeps insert and join in a single statement.
    pub async fn create(
        &self,
        content: &str,
        ticket_id: Uuid,
        user_id: Uuid,
    ) -> Result<CommentWithAuthorEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_comment");
        let result = sqlx::query_as::<_, CommentWithAuthorEntity>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (content, ticket_id, user_id)
                VALUES ($1, $2, $3)
                RETURNING id, content, ticket_id, user_id, created_at
            )
            SELECT i.id, i.content, i.ticket_id, i.user_id, i.created_at,
                   u.name AS author_name, u.role AS author_role
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(content)
        .bind(ticket_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All comments on a ticket, newest first, each with its author.
    pub async fn list_for_ticket(
        &self,
        ticket_id: Uuid,
    ) -> Result<Vec<CommentWithAuthorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_comments");
        let result = sqlx::query_as::<_, CommentWithAuthorEntity>(
            r#"
            SELECT c.id, c.content, c.ticket_id, c.user_id, c.created_at,
                   u.name AS author_name, u.role AS author_role
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.ticket_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
