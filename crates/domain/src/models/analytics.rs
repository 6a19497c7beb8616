//! Analytics rollup types.
//!
//! Read-only aggregates over tickets and users, recomputed on every query.

use serde::Serialize;

/// Headline counts for the analytics dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_tickets: i64,
    pub open_tickets: i64,
    pub closed_tickets: i64,
    /// Open tickets past their SLA deadline at query time.
    pub overdue_tickets: i64,
    pub total_users: i64,
    pub total_admins: i64,
    /// Tickets created in the trailing 7 days.
    pub recent_tickets: i64,
}

/// Ticket count for one priority.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCount {
    pub priority: String,
    pub count: i64,
}

/// Ticket count for one category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Ticket count for one status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// A user together with the ticket count that put them on top.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUser {
    pub name: String,
    pub email: String,
    pub ticket_count: i64,
}

/// Most active user (authored tickets) and admin (assigned tickets).
///
/// Equal counts are broken by lowest user id, so repeated queries over the
/// same data always report the same person.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStats {
    pub most_active_user: Option<TopUser>,
    pub most_active_admin: Option<TopUser>,
}

/// The full analytics payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub overview: AnalyticsOverview,
    pub tickets_by_priority: Vec<PriorityCount>,
    pub tickets_by_category: Vec<CategoryCount>,
    pub tickets_by_status: Vec<StatusCount>,
    pub top_stats: TopStats,
}
