//! Analytics route. One report assembled from aggregate queries.

use axum::{extract::State, Json};
use serde::Serialize;

use domain::models::AnalyticsReport;
use persistence::repositories::AnalyticsRepository;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub analytics: AnalyticsReport,
}

/// Workload snapshot: totals, breakdowns, ratings and top contributors.
///
/// GET /api/analytics (admin)
pub async fn get_analytics(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let analytics = AnalyticsRepository::new(state.pool.clone())
        .report()
        .await?;

    Ok(Json(AnalyticsResponse { analytics }))
}
