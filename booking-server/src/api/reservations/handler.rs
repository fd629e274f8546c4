//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{DiningTable, Reservation, ReservationCancel, ReservationCreate};

use crate::booking::{AvailabilityQuery, SweepReport};
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, created, ok};

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// "YYYY-MM-DD"
    pub date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityParams {
    pub date: String,
    pub time: String,
    pub party_size: i32,
    pub duration: Option<i32>,
    pub area_id: Option<i64>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/restaurants/{rid}/reservations - 创建预订
pub async fn create(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Reservation>>)> {
    let reservation = state.manager.create(rid, payload).await?;
    Ok(created(reservation))
}

/// GET /api/restaurants/{rid}/reservations?date= - 按本地日期列出
pub async fn list(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    state.admin.restaurant(rid).await?;
    let reservations = state.manager.list_for_date(rid, &query.date).await?;
    Ok(ok(reservations))
}

/// GET /api/restaurants/{rid}/reservations/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((rid, id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    Ok(ok(state.manager.get(rid, id).await?))
}

/// PATCH /api/restaurants/{rid}/reservations/{id}/confirm
pub async fn confirm(
    State(state): State<ServerState>,
    Path((rid, id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    Ok(ok(state.manager.confirm(rid, id).await?))
}

/// PATCH /api/restaurants/{rid}/reservations/{id}/seat
pub async fn seat(
    State(state): State<ServerState>,
    Path((rid, id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    Ok(ok(state.manager.seat(rid, id).await?))
}

/// PATCH /api/restaurants/{rid}/reservations/{id}/complete
pub async fn complete(
    State(state): State<ServerState>,
    Path((rid, id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    Ok(ok(state.manager.complete(rid, id).await?))
}

/// PATCH /api/restaurants/{rid}/reservations/{id}/cancel - 可选 `{ "reason": ... }`
pub async fn cancel(
    State(state): State<ServerState>,
    Path((rid, id)): Path<(i64, i64)>,
    payload: Option<Json<ReservationCancel>>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let reason = payload.and_then(|Json(p)| p.reason);
    Ok(ok(state.manager.cancel(rid, id, reason).await?))
}

/// GET /api/restaurants/{rid}/availability?date&time&partySize&duration&areaId
pub async fn availability(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<Json<ApiResponse<Vec<DiningTable>>>> {
    let tables = state
        .manager
        .available_tables(
            rid,
            AvailabilityQuery {
                date: params.date,
                time: params.time,
                party_size: params.party_size,
                duration_minutes: params.duration,
                area_id: params.area_id,
            },
        )
        .await?;
    Ok(ok(tables))
}

/// POST /api/restaurants/{rid}/expiry-sweep - 手动触发 no-show 扫描
pub async fn expiry_sweep(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
) -> AppResult<Json<ApiResponse<SweepReport>>> {
    Ok(ok(state.manager.sweep_expired(rid).await?))
}
