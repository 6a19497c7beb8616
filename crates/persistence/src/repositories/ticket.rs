//! Ticket repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use domain::models::{Priority, TicketCategory, TicketSort, TicketStatus};

use crate::entities::{TicketEntity, TicketWithRefsEntity};
use crate::metrics::QueryTimer;

const TICKET_COLUMNS: &str =
    "id, title, description, priority, category, status, sla_deadline, assigned_to, rating, \
     user_id, created_at";

/// Ticket columns joined with author/assignee profiles and the comment
/// count, for the read paths that embed them.
const TICKET_REFS_SELECT: &str = "SELECT t.id, t.title, t.description, t.priority, t.category, \
     t.status, t.sla_deadline, t.assigned_to, t.rating, t.user_id, t.created_at, \
     au.name AS author_name, au.email AS author_email, \
     ad.name AS assignee_name, ad.email AS assignee_email, \
     (SELECT COUNT(*) FROM comments c WHERE c.ticket_id = t.id) AS comment_count \
     FROM tickets t \
     JOIN users au ON au.id = t.user_id \
     LEFT JOIN users ad ON ad.id = t.assigned_to";

/// Filters for a ticket listing.
///
/// `visible_to` restricts the result to one author's tickets; it is set for
/// every non-admin caller and overrides whatever the other filters match.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub visible_to: Option<Uuid>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub category: Option<TicketCategory>,
    pub assigned_to: Option<Uuid>,
    pub rating: Option<i32>,
    pub search: Option<String>,
    pub sort: TicketSort,
}

/// Repository for ticket-related database operations.
#[derive(Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Creates a new TicketRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a ticket. The SLA deadline is computed by the caller from the
    /// priority and stored verbatim; this is the only write it ever gets.
    pub async fn create(
        &self,
        title: &str,
        description: &str,
        priority: Priority,
        category: TicketCategory,
        sla_deadline: DateTime<Utc>,
        user_id: Uuid,
    ) -> Result<TicketEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_ticket");
        let result = sqlx::query_as::<_, TicketEntity>(
            r#"
            INSERT INTO tickets (title, description, priority, category, status, sla_deadline, user_id)
            VALUES ($1, $2, $3, $4, 'open', $5, $6)
            RETURNING id, title, description, priority, category, status, sla_deadline, assigned_to,
                      rating, user_id, created_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(priority.as_str())
        .bind(category.as_str())
        .bind(sla_deadline)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a ticket by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TicketEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_ticket_by_id");
        let result = sqlx::query_as::<_, TicketEntity>(&format!(
            "SELECT {} FROM tickets WHERE id = $1",
            TICKET_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a ticket with its author/assignee profiles and comment count.
    pub async fn find_with_refs(
        &self,
        id: Uuid,
    ) -> Result<Option<TicketWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_ticket_with_refs");
        let result = sqlx::query_as::<_, TicketWithRefsEntity>(&format!(
            "{} WHERE t.id = $1",
            TICKET_REFS_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List tickets matching the filter, each with author/assignee profiles
    /// and comment count.
    ///
    /// Sorting by creation time or SLA deadline happens in the query.
    /// Priority ordering is a full in-memory pass over the fetched set
    /// (stable, so equal priorities keep store order).
    pub async fn list(
        &self,
        filter: &TicketFilter,
    ) -> Result<Vec<TicketWithRefsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_tickets");

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("{} WHERE 1=1", TICKET_REFS_SELECT));

        if let Some(author) = filter.visible_to {
            qb.push(" AND t.user_id = ").push_bind(author);
        }
        if let Some(status) = filter.status {
            qb.push(" AND t.status = ").push_bind(status.as_str());
        }
        if let Some(priority) = filter.priority {
            qb.push(" AND t.priority = ").push_bind(priority.as_str());
        }
        if let Some(category) = filter.category {
            qb.push(" AND t.category = ").push_bind(category.as_str());
        }
        if let Some(assignee) = filter.assigned_to {
            qb.push(" AND t.assigned_to = ").push_bind(assignee);
        }
        if let Some(rating) = filter.rating {
            qb.push(" AND t.rating = ").push_bind(rating);
        }
        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", escape_like(search));
            qb.push(" AND (t.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR t.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        // Priority order is applied in memory by the caller; fetch those in
        // the default (newest) order so the tie-break is well defined.
        match filter.sort {
            TicketSort::Oldest => qb.push(" ORDER BY t.created_at ASC"),
            TicketSort::Sla => qb.push(" ORDER BY t.sla_deadline ASC"),
            TicketSort::Newest | TicketSort::Priority => qb.push(" ORDER BY t.created_at DESC"),
        };

        let result = qb
            .build_query_as::<TicketWithRefsEntity>()
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Apply status and/or assignment changes. Fields left as `None` are
    /// untouched; with neither set, the row is returned unchanged.
    ///
    /// Returns `None` if the ticket does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        status: Option<TicketStatus>,
        assigned_to: Option<Uuid>,
    ) -> Result<Option<TicketEntity>, sqlx::Error> {
        if status.is_none() && assigned_to.is_none() {
            return self.find_by_id(id).await;
        }

        let timer = QueryTimer::new("update_ticket");

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE tickets SET ");
        let mut first = true;
        if let Some(status) = status {
            qb.push("status = ").push_bind(status.as_str());
            first = false;
        }
        if let Some(assignee) = assigned_to {
            if !first {
                qb.push(", ");
            }
            qb.push("assigned_to = ").push_bind(assignee);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {}", TICKET_COLUMNS));

        let result = qb
            .build_query_as::<TicketEntity>()
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Set the author's rating, but only while the ticket is closed.
    ///
    /// The state check is part of the UPDATE itself, so a concurrent reopen
    /// cannot slip between a read and the write. Returns whether a row was
    /// updated; the caller distinguishes "missing" from "not closed" by
    /// having fetched the ticket for the ownership check.
    pub async fn set_rating_if_closed(
        &self,
        id: Uuid,
        rating: i32,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("rate_ticket");
        let result = sqlx::query(
            r#"
            UPDATE tickets
            SET rating = $1
            WHERE id = $2 AND status = 'closed'
            "#,
        )
        .bind(rating)
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Delete a ticket and its comments in one transaction.
    ///
    /// The comments FK also declares ON DELETE CASCADE; the explicit
    /// two-step keeps the deletion order visible and atomic either way.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_ticket");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE ticket_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}

/// Escape LIKE wildcards in user-supplied search text so they match
/// literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain text"), "plain text");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_default_filter_is_unrestricted_newest() {
        let filter = TicketFilter::default();
        assert!(filter.visible_to.is_none());
        assert!(filter.status.is_none());
        assert!(filter.search.is_none());
        assert_eq!(filter.sort, TicketSort::Newest);
    }
}
