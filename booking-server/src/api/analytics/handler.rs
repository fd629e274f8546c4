//! Analytics API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::AnalyticsSummary;

use crate::analytics::AnalyticsQuery;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok};

/// GET /api/restaurants/{rid}/analytics?startDate&endDate&period
pub async fn summary(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<ApiResponse<AnalyticsSummary>>> {
    Ok(ok(state.analytics.summary(rid, &query).await?))
}
