//! Common validation helpers.
//!
//! Range and shape checks shared by request DTOs. Enum-valued fields
//! (priority, category, role, sort order) are validated by parsing into
//! their domain enums instead.

use validator::ValidationError;

/// Minimum length of a user's display name.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum length of a password at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Inclusive rating bounds for closed tickets.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Validates that a ticket rating is an integer between 1 and 5 inclusive.
pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        let mut err = ValidationError::new("rating_range");
        err.message = Some("Rating must be between 1 and 5".into());
        Err(err)
    }
}

/// Validates that a text field is non-empty after trimming whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be empty".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates a display name's minimum length.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        let mut err = ValidationError::new("name_length");
        err.message = Some("Name must be at least 2 characters".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates a password's minimum length at registration.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LEN {
        let mut err = ValidationError::new("password_length");
        err.message = Some("Password must be at least 6 characters".into());
        Err(err)
    } else {
        Ok(())
    }
}
