//! Analytics repository.
//!
//! Aggregates are recomputed from the live tables on every call; nothing is
//! cached or materialized.

use sqlx::{FromRow, PgPool};

use domain::models::{
    AnalyticsOverview, AnalyticsReport, CategoryCount, PriorityCount, StatusCount, TopStats,
    TopUser,
};

use crate::metrics::QueryTimer;

#[derive(Debug, FromRow)]
struct OverviewRow {
    total_tickets: i64,
    open_tickets: i64,
    closed_tickets: i64,
    overdue_tickets: i64,
    total_users: i64,
    total_admins: i64,
    recent_tickets: i64,
}

#[derive(Debug, FromRow)]
struct GroupCountRow {
    label: String,
    count: i64,
}

#[derive(Debug, FromRow)]
struct TopUserRow {
    name: String,
    email: String,
    ticket_count: i64,
}

/// Repository computing the analytics dashboard aggregates.
#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    /// Creates a new AnalyticsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compute the full dashboard payload.
    pub async fn report(&self) -> Result<AnalyticsReport, sqlx::Error> {
        let timer = QueryTimer::new("analytics_report");

        let overview = self.overview().await?;
        let tickets_by_priority = self.count_by("priority").await?;
        let tickets_by_category = self.count_by("category").await?;
        let tickets_by_status = self.count_by("status").await?;
        let most_active_user = self.most_active_user().await?;
        let most_active_admin = self.most_active_admin().await?;

        timer.record();
        Ok(AnalyticsReport {
            overview,
            tickets_by_priority: tickets_by_priority
                .into_iter()
                .map(|r| PriorityCount {
                    priority: r.label,
                    count: r.count,
                })
                .collect(),
            tickets_by_category: tickets_by_category
                .into_iter()
                .map(|r| CategoryCount {
                    category: r.label,
                    count: r.count,
                })
                .collect(),
            tickets_by_status: tickets_by_status
                .into_iter()
                .map(|r| StatusCount {
                    status: r.label,
                    count: r.count,
                })
                .collect(),
            top_stats: TopStats {
                most_active_user,
                most_active_admin,
            },
        })
    }

    async fn overview(&self) -> Result<AnalyticsOverview, sqlx::Error> {
        let row = sqlx::query_as::<_, OverviewRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM tickets) AS total_tickets,
                (SELECT COUNT(*) FROM tickets WHERE status = 'open') AS open_tickets,
                (SELECT COUNT(*) FROM tickets WHERE status = 'closed') AS closed_tickets,
                (SELECT COUNT(*) FROM tickets
                 WHERE status = 'open' AND sla_deadline < NOW()) AS overdue_tickets,
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM users WHERE role = 'admin') AS total_admins,
                (SELECT COUNT(*) FROM tickets
                 WHERE created_at > NOW() - INTERVAL '7 days') AS recent_tickets
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(AnalyticsOverview {
            total_tickets: row.total_tickets,
            open_tickets: row.open_tickets,
            closed_tickets: row.closed_tickets,
            overdue_tickets: row.overdue_tickets,
            total_users: row.total_users,
            total_admins: row.total_admins,
            recent_tickets: row.recent_tickets,
        })
    }

    /// Group ticket counts by one of the enum columns, largest bucket first.
    ///
    /// `column` is a compile-time constant from [`report`](Self::report),
    /// never caller input.
    async fn count_by(&self, column: &str) -> Result<Vec<GroupCountRow>, sqlx::Error> {
        sqlx::query_as::<_, GroupCountRow>(&format!(
            "SELECT {col} AS label, COUNT(*) AS count FROM tickets \
             GROUP BY {col} ORDER BY count DESC, {col} ASC",
            col = column
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// User who authored the most tickets. Ties resolve to the lowest user
    /// id so the winner is stable across queries.
    async fn most_active_user(&self) -> Result<Option<TopUser>, sqlx::Error> {
        let row = sqlx::query_as::<_, TopUserRow>(
            r#"
            SELECT u.name, u.email, COUNT(t.id) AS ticket_count
            FROM users u
            JOIN tickets t ON t.user_id = u.id
            GROUP BY u.id, u.name, u.email
            ORDER BY ticket_count DESC, u.id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| TopUser {
            name: r.name,
            email: r.email,
            ticket_count: r.ticket_count,
        }))
    }

    /// Admin holding the most assignments, same tie-break as above.
    async fn most_active_admin(&self) -> Result<Option<TopUser>, sqlx::Error> {
        let row = sqlx::query_as::<_, TopUserRow>(
            r#"
            SELECT u.name, u.email, COUNT(t.id) AS ticket_count
            FROM users u
            JOIN tickets t ON t.assigned_to = u.id
            WHERE u.role = 'admin'
            GROUP BY u.id, u.name, u.email
            ORDER BY ticket_count DESC, u.id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| TopUser {
            name: r.name,
            email: r.email,
            ticket_count: r.ticket_count,
        }))
    }
}
