//! Ticket entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::{Priority, PublicProfile, Ticket, TicketCategory, TicketStatus};

/// Database row mapping for the tickets table.
#[derive(Debug, Clone, FromRow)]
pub struct TicketEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
    pub status: String,
    pub sla_deadline: DateTime<Utc>,
    pub assigned_to: Option<Uuid>,
    pub rating: Option<i32>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<TicketEntity> for Ticket {
    fn from(entity: TicketEntity) -> Self {
        // The enum columns carry CHECK constraints; fall back to the mildest
        // value rather than panic on a row written outside the application.
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            priority: Priority::from_str(&entity.priority).unwrap_or(Priority::Low),
            category: TicketCategory::from_str(&entity.category).unwrap_or_default(),
            status: TicketStatus::from_str(&entity.status).unwrap_or(TicketStatus::Open),
            sla_deadline: entity.sla_deadline,
            assigned_to: entity.assigned_to,
            rating: entity.rating,
            user_id: entity.user_id,
            created_at: entity.created_at,
        }
    }
}

/// Ticket row joined with its author's profile, the assignee's profile and
/// the comment count, for the read paths that embed them.
#[derive(Debug, Clone, FromRow)]
pub struct TicketWithRefsEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
    pub status: String,
    pub sla_deadline: DateTime<Utc>,
    pub assigned_to: Option<Uuid>,
    pub rating: Option<i32>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_email: String,
    pub assignee_name: Option<String>,
    pub assignee_email: Option<String>,
    pub comment_count: i64,
}

impl TicketWithRefsEntity {
    pub fn author(&self) -> PublicProfile {
        PublicProfile {
            id: self.user_id,
            name: self.author_name.clone(),
            email: self.author_email.clone(),
        }
    }

    /// The assigned admin's profile, when the ticket is assigned.
    pub fn assignee(&self) -> Option<PublicProfile> {
        match (self.assigned_to, &self.assignee_name, &self.assignee_email) {
            (Some(id), Some(name), Some(email)) => Some(PublicProfile {
                id,
                name: name.clone(),
                email: email.clone(),
            }),
            _ => None,
        }
    }
}

impl From<TicketWithRefsEntity> for Ticket {
    fn from(entity: TicketWithRefsEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            priority: Priority::from_str(&entity.priority).unwrap_or(Priority::Low),
            category: TicketCategory::from_str(&entity.category).unwrap_or_default(),
            status: TicketStatus::from_str(&entity.status).unwrap_or(TicketStatus::Open),
            sla_deadline: entity.sla_deadline,
            assigned_to: entity.assigned_to,
            rating: entity.rating,
            user_id: entity.user_id,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs_entity(assigned: bool) -> TicketWithRefsEntity {
        TicketWithRefsEntity {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            description: "d".to_string(),
            priority: "medium".to_string(),
            category: "general".to_string(),
            status: "open".to_string(),
            sla_deadline: Utc::now(),
            assigned_to: assigned.then(Uuid::new_v4),
            rating: None,
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
            author_name: "Ada".to_string(),
            author_email: "ada@example.com".to_string(),
            assignee_name: assigned.then(|| "Grace".to_string()),
            assignee_email: assigned.then(|| "grace@example.com".to_string()),
            comment_count: 2,
        }
    }

    #[test]
    fn test_refs_author_profile() {
        let entity = refs_entity(false);
        let author = entity.author();
        assert_eq!(author.id, entity.user_id);
        assert_eq!(author.name, "Ada");
        assert_eq!(author.email, "ada@example.com");
    }

    #[test]
    fn test_refs_assignee_profile() {
        let unassigned = refs_entity(false);
        assert!(unassigned.assignee().is_none());

        let assigned = refs_entity(true);
        let assignee = assigned.assignee().unwrap();
        assert_eq!(Some(assignee.id), assigned.assigned_to);
        assert_eq!(assignee.name, "Grace");
    }

    #[test]
    fn test_into_domain_ticket() {
        let entity = TicketEntity {
            id: Uuid::new_v4(),
            title: "Printer on fire".to_string(),
            description: "Smoke everywhere".to_string(),
            priority: "high".to_string(),
            category: "technical".to_string(),
            status: "open".to_string(),
            sla_deadline: Utc::now(),
            assigned_to: None,
            rating: None,
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let ticket: Ticket = entity.into();
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.category, TicketCategory::Technical);
        assert_eq!(ticket.status, TicketStatus::Open);
    }
}
