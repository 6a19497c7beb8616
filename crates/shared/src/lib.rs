//! Shared utilities for the helpdesk backend.
//!
//! This crate provides functionality used across the other crates:
//! - JWT token issuance and validation
//! - Password hashing with Argon2id
//! - Common field validation helpers

pub mod jwt;
pub mod password;
pub mod validation;
