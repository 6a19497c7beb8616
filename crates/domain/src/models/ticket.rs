//! Ticket domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Ticket priority, which determines the SLA deadline at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Rank for priority sorting: high sorts before medium before low.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ticket category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketCategory {
    General,
    Technical,
    Billing,
    Account,
    FeatureRequest,
    BugReport,
    Other,
}

impl TicketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::General => "general",
            TicketCategory::Technical => "technical",
            TicketCategory::Billing => "billing",
            TicketCategory::Account => "account",
            TicketCategory::FeatureRequest => "feature-request",
            TicketCategory::BugReport => "bug-report",
            TicketCategory::Other => "other",
        }
    }
}

impl Default for TicketCategory {
    fn default() -> Self {
        TicketCategory::General
    }
}

impl FromStr for TicketCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(TicketCategory::General),
            "technical" => Ok(TicketCategory::Technical),
            "billing" => Ok(TicketCategory::Billing),
            "account" => Ok(TicketCategory::Account),
            "feature-request" => Ok(TicketCategory::FeatureRequest),
            "bug-report" => Ok(TicketCategory::BugReport),
            "other" => Ok(TicketCategory::Other),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored ticket lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Closed => "closed",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived urgency classification attached to ticket reads. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaStatus {
    Open,
    Overdue,
    Closed,
}

impl SlaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlaStatus::Open => "open",
            SlaStatus::Overdue => "overdue",
            SlaStatus::Closed => "closed",
        }
    }
}

/// A support ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: TicketCategory,
    pub status: TicketStatus,
    /// Fixed at creation from the priority; never updated afterwards.
    pub sla_deadline: DateTime<Utc>,
    pub assigned_to: Option<Uuid>,
    pub rating: Option<i32>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Sort order for ticket listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSort {
    /// Most recently created first (default).
    Newest,
    /// Oldest first.
    Oldest,
    /// High before medium before low; ties keep the fetched order.
    Priority,
    /// Soonest SLA deadline first.
    Sla,
}

impl Default for TicketSort {
    fn default() -> Self {
        TicketSort::Newest
    }
}

impl FromStr for TicketSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(TicketSort::Newest),
            "oldest" => Ok(TicketSort::Oldest),
            "priority" => Ok(TicketSort::Priority),
            "sla" => Ok(TicketSort::Sla),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Comparator for priority ordering over a fetched result set.
///
/// Applied in memory with a stable sort, so equal priorities keep whatever
/// order the store returned them in.
pub fn compare_priority(a: &Ticket, b: &Ticket) -> Ordering {
    a.priority.rank().cmp(&b.priority.rank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ticket(priority: Priority, offset_secs: i64) -> Ticket {
        let now = Utc::now();
        Ticket {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            description: "d".to_string(),
            priority,
            category: TicketCategory::General,
            status: TicketStatus::Open,
            sla_deadline: now + Duration::seconds(offset_secs),
            assigned_to: None,
            rating: None,
            user_id: Uuid::new_v4(),
            created_at: now,
        }
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::from_str("high").unwrap(), Priority::High);
        assert_eq!(Priority::from_str("medium").unwrap(), Priority::Medium);
        assert_eq!(Priority::from_str("low").unwrap(), Priority::Low);
        assert!(Priority::from_str("urgent").is_err());
        assert!(Priority::from_str("").is_err());
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_category_parse_and_default() {
        assert_eq!(
            TicketCategory::from_str("feature-request").unwrap(),
            TicketCategory::FeatureRequest
        );
        assert_eq!(
            TicketCategory::from_str("bug-report").unwrap(),
            TicketCategory::BugReport
        );
        assert!(TicketCategory::from_str("misc").is_err());
        assert_eq!(TicketCategory::default(), TicketCategory::General);
    }

    #[test]
    fn test_category_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TicketCategory::FeatureRequest).unwrap(),
            "\"feature-request\""
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TicketStatus::from_str("open").unwrap(), TicketStatus::Open);
        assert_eq!(
            TicketStatus::from_str("closed").unwrap(),
            TicketStatus::Closed
        );
        assert!(TicketStatus::from_str("resolved").is_err());
    }

    #[test]
    fn test_sort_parse_and_default() {
        assert_eq!(TicketSort::from_str("newest").unwrap(), TicketSort::Newest);
        assert_eq!(TicketSort::from_str("sla").unwrap(), TicketSort::Sla);
        assert!(TicketSort::from_str("rating").is_err());
        assert_eq!(TicketSort::default(), TicketSort::Newest);
    }

    #[test]
    fn test_compare_priority_orders_high_first() {
        let mut tickets = vec![
            ticket(Priority::Low, 0),
            ticket(Priority::High, 0),
            ticket(Priority::Medium, 0),
        ];
        tickets.sort_by(compare_priority);

        let order: Vec<Priority> = tickets.iter().map(|t| t.priority).collect();
        assert_eq!(order, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn test_compare_priority_stable_for_ties() {
        let first = ticket(Priority::Medium, 0);
        let second = ticket(Priority::Medium, 0);
        let first_id = first.id;
        let second_id = second.id;

        let mut tickets = vec![first, second];
        tickets.sort_by(compare_priority);

        assert_eq!(tickets[0].id, first_id);
        assert_eq!(tickets[1].id, second_id);
    }

    #[test]
    fn test_ticket_serializes_camel_case() {
        let t = ticket(Priority::High, 3600);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("slaDeadline"));
        assert!(json.contains("assignedTo"));
        assert!(json.contains("userId"));
        assert!(json.contains("createdAt"));
    }
}
