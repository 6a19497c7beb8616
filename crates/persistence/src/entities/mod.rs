//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod canned_response;
pub mod comment;
pub mod ticket;
pub mod user;

pub use canned_response::CannedResponseEntity;
pub use comment::{CommentEntity, CommentWithAuthorEntity};
pub use ticket::{TicketEntity, TicketWithRefsEntity};
pub use user::{UserEntity, UserWithCountsEntity};
