//! Repository implementations for database operations.

pub mod analytics;
pub mod canned_response;
pub mod comment;
pub mod ticket;
pub mod user;

pub use analytics::AnalyticsRepository;
pub use canned_response::CannedResponseRepository;
pub use comment::CommentRepository;
pub use ticket::{TicketFilter, TicketRepository};
pub use user::UserRepository;
