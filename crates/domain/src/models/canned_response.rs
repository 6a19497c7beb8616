//! Canned response domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// An admin-authored reusable reply template. Not tied to any ticket or
/// owner; visible to every admin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CannedResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_response_serialization() {
        let response = CannedResponse {
            id: Uuid::new_v4(),
            title: "Password reset".to_string(),
            content: "Please use the reset link sent to your email.".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("createdAt"));
        assert!(json.contains("Password reset"));
    }
}
