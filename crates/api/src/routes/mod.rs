//! Route handlers.

pub mod analytics;
pub mod auth;
pub mod canned_responses;
pub mod comments;
pub mod health;
pub mod tickets;
pub mod users;
