//! Domain model definitions.

pub mod analytics;
pub mod canned_response;
pub mod comment;
pub mod ticket;
pub mod user;

pub use analytics::{
    AnalyticsOverview, AnalyticsReport, CategoryCount, PriorityCount, StatusCount, TopStats,
    TopUser,
};
pub use canned_response::CannedResponse;
pub use comment::{Comment, CommentAuthor};
pub use ticket::{
    compare_priority, Priority, SlaStatus, Ticket, TicketCategory, TicketSort, TicketStatus,
};
pub use user::{PublicProfile, Role, User};
