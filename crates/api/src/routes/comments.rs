//! Comment routes. Comments live under their ticket and are immutable.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::{CommentAuthor, Ticket, TicketStatus};
use persistence::entities::CommentWithAuthorEntity;
use persistence::repositories::{CommentRepository, TicketRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Request body for adding a comment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub content: String,
}

/// A comment with its author, as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub ticket_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user: CommentAuthor,
}

impl From<CommentWithAuthorEntity> for CommentResponse {
    fn from(entity: CommentWithAuthorEntity) -> Self {
        let user = entity.author();
        Self {
            id: entity.id,
            content: entity.content,
            ticket_id: entity.ticket_id,
            created_at: entity.created_at,
            user,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize)]
pub struct CreatedCommentResponse {
    pub message: String,
    pub comment: CommentResponse,
}

/// Loads the ticket and applies the comment visibility rules.
///
/// Check order: missing ticket, then ownership, then (for writes) state.
async fn load_visible_ticket(
    state: &AppState,
    auth: &AuthUser,
    ticket_id: Uuid,
) -> Result<Ticket, ApiError> {
    let entity = TicketRepository::new(state.pool.clone())
        .find_by_id(ticket_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".into()))?;
    let ticket: Ticket = entity.into();

    if !auth.role.is_admin() && ticket.user_id != auth.user_id {
        return Err(ApiError::Forbidden("Access denied".into()));
    }

    Ok(ticket)
}

/// Add a comment to an open ticket.
///
/// POST /api/tickets/:id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(ticket_id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CreatedCommentResponse>), ApiError> {
    request.validate()?;

    let ticket = load_visible_ticket(&state, &auth, ticket_id).await?;

    if ticket.status == TicketStatus::Closed {
        return Err(ApiError::InvalidState(
            "Cannot comment on a closed ticket".into(),
        ));
    }

    let entity = CommentRepository::new(state.pool.clone())
        .create(request.content.trim(), ticket_id, auth.user_id)
        .await?;

    tracing::info!(ticket_id = %ticket_id, comment_id = %entity.id, "Comment added");

    Ok((
        StatusCode::CREATED,
        Json(CreatedCommentResponse {
            message: "Comment added successfully".to_string(),
            comment: entity.into(),
        }),
    ))
}

/// List a ticket's comments, most recent first.
///
/// GET /api/tickets/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(ticket_id): Path<Uuid>,
) -> Result<Json<CommentListResponse>, ApiError> {
    load_visible_ticket(&state, &auth, ticket_id).await?;

    let comments = CommentRepository::new(state.pool.clone())
        .list_for_ticket(ticket_id)
        .await?
        .into_iter()
        .map(CommentResponse::from)
        .collect();

    Ok(Json(CommentListResponse { comments }))
}
