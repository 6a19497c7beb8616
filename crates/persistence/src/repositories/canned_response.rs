//! Canned response repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CannedResponseEntity;
use crate::metrics::QueryTimer;

/// Repository for canned response templates.
#[derive(Clone)]
pub struct CannedResponseRepository {
    pool: PgPool,
}

impl CannedResponseRepository {
    /// Creates a new CannedResponseRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        title: &str,
        content: &str,
    ) -> Result<CannedResponseEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_canned_response");
        let result = sqlx::query_as::<_, CannedResponseEntity>(
            r#"
            INSERT INTO canned_responses (title, content)
            VALUES ($1, $2)
            RETURNING id, title, content, created_at
            "#,
        )
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All templates, newest first.
    pub async fn list(&self) -> Result<Vec<CannedResponseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_canned_responses");
        let result = sqlx::query_as::<_, CannedResponseEntity>(
            "SELECT id, title, content, created_at FROM canned_responses ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace a template's title and content. Returns the updated row, or
    /// `None` if it does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Option<CannedResponseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_canned_response");
        let result = sqlx::query_as::<_, CannedResponseEntity>(
            r#"
            UPDATE canned_responses
            SET title = $1, content = $2
            WHERE id = $3
            RETURNING id, title, content, created_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_canned_response");
        let result = sqlx::query("DELETE FROM canned_responses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
