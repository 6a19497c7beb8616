//! Domain layer for the helpdesk backend.
//!
//! This crate contains:
//! - Domain models (User, Ticket, Comment, CannedResponse, analytics types)
//! - The SLA deadline/status policy

pub mod models;
pub mod sla;
