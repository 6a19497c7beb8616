//! Ticket routes: filing, listing, triage, rating and deletion.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    compare_priority, Priority, PublicProfile, SlaStatus, Ticket, TicketCategory, TicketSort,
    TicketStatus,
};
use domain::sla;
use persistence::entities::TicketWithRefsEntity;
use persistence::repositories::{CommentRepository, TicketFilter, TicketRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::metrics::record_ticket_created;
use crate::routes::comments::CommentResponse;

/// Request body for filing a ticket.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub description: String,

    /// Must parse as a priority; there is no default.
    pub priority: String,

    /// Defaults to `general` when absent.
    pub category: Option<String>,
}

/// Query parameters for the ticket listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketsQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub rating: Option<i32>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// Request body for admin triage updates.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub status: Option<String>,
    /// Absent or empty means "leave the assignment as it is".
    pub assigned_to: Option<String>,
}

/// Request body for rating a closed ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTicketRequest {
    pub rating: i32,
}

/// A ticket with its derived SLA status, author and assignee profiles, and
/// comment count. Every response embedding a ticket uses this shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub sla_status: SlaStatus,
    pub user: PublicProfile,
    pub assigned_admin: Option<PublicProfile>,
    pub comment_count: i64,
}

/// Full ticket view: the enriched ticket plus its comments.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetailResponse {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub sla_status: SlaStatus,
    pub user: PublicProfile,
    pub assigned_admin: Option<PublicProfile>,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize)]
pub struct TicketListResponse {
    pub tickets: Vec<TicketResponse>,
}

#[derive(Debug, Serialize)]
pub struct CreatedTicketResponse {
    pub message: String,
    pub ticket: TicketResponse,
}

fn to_response(entity: TicketWithRefsEntity) -> TicketResponse {
    let user = entity.author();
    let assigned_admin = entity.assignee();
    let comment_count = entity.comment_count;
    let ticket: Ticket = entity.into();
    let sla_status = sla::compute_status(ticket.status, ticket.sla_deadline, Utc::now());
    TicketResponse {
        ticket,
        sla_status,
        user,
        assigned_admin,
        comment_count,
    }
}

/// Non-admins may only see tickets they authored.
fn ensure_visible(auth: &AuthUser, author_id: Uuid) -> Result<(), ApiError> {
    if auth.role.is_admin() || author_id == auth.user_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Access denied".into()))
    }
}

/// File a new ticket.
///
/// POST /api/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<CreatedTicketResponse>), ApiError> {
    request.validate()?;

    let priority = Priority::from_str(&request.priority).map_err(ApiError::Validation)?;
    let category = match request.category.as_deref() {
        None | Some("") => TicketCategory::default(),
        Some(raw) => TicketCategory::from_str(raw).map_err(ApiError::Validation)?,
    };

    let created_at = Utc::now();
    let sla_deadline = sla::compute_deadline(priority, created_at);

    let repo = TicketRepository::new(state.pool.clone());
    let created = repo
        .create(
            request.title.trim(),
            request.description.trim(),
            priority,
            category,
            sla_deadline,
            auth.user_id,
        )
        .await?;

    let entity = repo
        .find_with_refs(created.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Created ticket vanished".into()))?;

    record_ticket_created(priority.as_str());
    tracing::info!(ticket_id = %created.id, priority = %priority, "Ticket created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedTicketResponse {
            message: "Ticket created successfully".to_string(),
            ticket: to_response(entity),
        }),
    ))
}

/// List tickets visible to the caller, filtered and sorted.
///
/// GET /api/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTicketsQuery>,
) -> Result<Json<TicketListResponse>, ApiError> {
    let filter = build_filter(&auth, &query)?;

    let entities = TicketRepository::new(state.pool.clone()).list(&filter).await?;
    let mut tickets: Vec<TicketResponse> = entities.into_iter().map(to_response).collect();

    if filter.sort == TicketSort::Priority {
        tickets.sort_by(|a, b| compare_priority(&a.ticket, &b.ticket));
    }

    Ok(Json(TicketListResponse { tickets }))
}

/// Fetch one ticket with author, assignee and comments.
///
/// GET /api/tickets/:id
pub async fn get_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TicketDetailResponse>, ApiError> {
    let entity = TicketRepository::new(state.pool.clone())
        .find_with_refs(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".into()))?;

    ensure_visible(&auth, entity.user_id)?;

    let user = entity.author();
    let assigned_admin = entity.assignee();
    let ticket: Ticket = entity.into();

    let comments = CommentRepository::new(state.pool.clone())
        .list_for_ticket(ticket.id)
        .await?
        .into_iter()
        .map(CommentResponse::from)
        .collect();

    let sla_status = sla::compute_status(ticket.status, ticket.sla_deadline, Utc::now());

    Ok(Json(TicketDetailResponse {
        ticket,
        sla_status,
        user,
        assigned_admin,
        comments,
    }))
}

/// Triage a ticket: change status and/or assign an admin.
///
/// PATCH /api/tickets/:id (admin)
pub async fn update_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTicketRequest>,
) -> Result<Json<TicketResponse>, ApiError> {
    if !auth.role.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".into()));
    }

    let status = match request.status.as_deref() {
        None => None,
        Some(raw) => Some(TicketStatus::from_str(raw).map_err(ApiError::Validation)?),
    };

    // An empty assignee means no change; there is no way to unassign.
    let assigned_to = match request.assigned_to.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            Uuid::parse_str(raw)
                .map_err(|_| ApiError::Validation("Invalid assignee id".into()))?,
        ),
    };

    let repo = TicketRepository::new(state.pool.clone());
    repo.update(id, status, assigned_to)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".into()))?;

    let entity = repo
        .find_with_refs(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".into()))?;

    tracing::info!(ticket_id = %id, "Ticket updated");

    Ok(Json(to_response(entity)))
}

/// Rate a closed ticket. Only its author may rate it, admins included.
///
/// POST /api/tickets/:id/rate
pub async fn rate_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RateTicketRequest>,
) -> Result<Json<TicketResponse>, ApiError> {
    shared::validation::validate_rating(request.rating)
        .map_err(|e| ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default()))?;

    let repo = TicketRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".into()))?;

    if entity.user_id != auth.user_id {
        return Err(ApiError::Forbidden(
            "Only the ticket author can rate it".into(),
        ));
    }

    // The closed-state check happens inside the UPDATE itself, so a
    // concurrent reopen cannot race the write.
    let updated = repo.set_rating_if_closed(id, request.rating).await?;
    if !updated {
        return Err(ApiError::InvalidState(
            "Only closed tickets can be rated".into(),
        ));
    }

    let entity = repo
        .find_with_refs(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".into()))?;

    Ok(Json(to_response(entity)))
}

/// Delete a ticket and its comments.
///
/// DELETE /api/tickets/:id (admin)
pub async fn delete_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !auth.role.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".into()));
    }

    let deleted = TicketRepository::new(state.pool.clone()).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Ticket not found".into()));
    }

    tracing::info!(ticket_id = %id, "Ticket deleted");

    Ok(Json(
        serde_json::json!({ "message": "Ticket deleted successfully" }),
    ))
}

fn build_filter(auth: &AuthUser, query: &ListTicketsQuery) -> Result<TicketFilter, ApiError> {
    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(TicketStatus::from_str(raw).map_err(ApiError::Validation)?),
    };
    let priority = match query.priority.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(Priority::from_str(raw).map_err(ApiError::Validation)?),
    };
    let category = match query.category.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(TicketCategory::from_str(raw).map_err(ApiError::Validation)?),
    };
    let sort = match query.sort.as_deref() {
        None | Some("") => TicketSort::default(),
        Some(raw) => TicketSort::from_str(raw).map_err(ApiError::Validation)?,
    };

    if let Some(rating) = query.rating {
        shared::validation::validate_rating(rating).map_err(|e| {
            ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default())
        })?;
    }

    Ok(TicketFilter {
        // Admins see everything; everyone else only their own tickets.
        visible_to: (!auth.role.is_admin()).then_some(auth.user_id),
        status,
        priority,
        category,
        assigned_to: query.assigned_to,
        rating: query.rating,
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
        sort,
    })
}
