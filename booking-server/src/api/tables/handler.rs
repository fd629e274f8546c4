//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{DiningTable, TableStatusView};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    /// Unix millis; defaults to now
    pub at: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MaintenancePayload {
    pub in_maintenance: bool,
}

/// GET /api/restaurants/{rid}/tables/status?at= - 计算得出的桌台状态
pub async fn status(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<Vec<TableStatusView>>>> {
    let at = query
        .at
        .unwrap_or_else(|| state.manager.clock().now_millis());
    Ok(ok(state.manager.table_statuses(rid, at).await?))
}

/// PUT /api/restaurants/{rid}/tables/{table_id}/maintenance - 唯一持久化的桌台状态
pub async fn set_maintenance(
    State(state): State<ServerState>,
    Path((rid, table_id)): Path<(i64, i64)>,
    Json(payload): Json<MaintenancePayload>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    let table = state
        .admin
        .set_table_maintenance(rid, table_id, payload.in_maintenance)
        .await?;
    Ok(ok(table))
}
