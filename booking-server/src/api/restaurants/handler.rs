//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{
    Area, AreaCreate, AreaUpdate, BusinessRule, BusinessRuleCreate, BusinessRuleUpdate,
    DiningTable, DiningTableCreate, DiningTableUpdate, OperatingHour, Restaurant, RestaurantCreate, RestaurantSettings, RestaurantSettingsUpdate,
    RestaurantUpdate, SpecialDayInput, WeeklyHoursInput,
};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, created, ok};

type Created<T> = AppResult<(StatusCode, Json<ApiResponse<T>>)>;

// ============================================================================
// Restaurant
// ============================================================================

/// POST /api/restaurants - 创建餐厅 (同时写入默认设置)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantCreate>,
) -> Created<Restaurant> {
    Ok(created(state.admin.create_restaurant(payload).await?))
}

/// GET /api/restaurants/{rid}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    Ok(ok(state.admin.restaurant(rid).await?))
}

/// PUT /api/restaurants/{rid}
pub async fn update(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    Ok(ok(state.admin.update_restaurant(rid, payload).await?))
}

// ============================================================================
// Settings & hours
// ============================================================================

/// GET /api/restaurants/{rid}/settings
pub async fn get_settings(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
) -> AppResult<Json<ApiResponse<RestaurantSettings>>> {
    Ok(ok(state.admin.settings(rid).await?))
}

/// PUT /api/restaurants/{rid}/settings - 部分更新
pub async fn update_settings(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Json(payload): Json<RestaurantSettingsUpdate>,
) -> AppResult<Json<ApiResponse<RestaurantSettings>>> {
    Ok(ok(state.admin.update_settings(rid, payload).await?))
}

/// GET /api/restaurants/{rid}/hours
pub async fn list_hours(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<OperatingHour>>>> {
    state.admin.restaurant(rid).await?;
    Ok(ok(state.admin.operating_hours(rid).await?))
}

/// PUT /api/restaurants/{rid}/hours/weekly - 每个星期几一条
pub async fn set_weekly_hours(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Json(payload): Json<WeeklyHoursInput>,
) -> AppResult<Json<ApiResponse<OperatingHour>>> {
    Ok(ok(state.admin.set_weekly_hours(rid, payload).await?))
}

/// PUT /api/restaurants/{rid}/hours/special - 特殊日期 (节假日、闭店)
pub async fn set_special_day(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Json(payload): Json<SpecialDayInput>,
) -> AppResult<Json<ApiResponse<OperatingHour>>> {
    Ok(ok(state.admin.set_special_day(rid, payload).await?))
}

// ============================================================================
// Areas, tables, rules
// ============================================================================

/// GET /api/restaurants/{rid}/areas
pub async fn list_areas(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<Area>>>> {
    state.admin.restaurant(rid).await?;
    Ok(ok(state.admin.areas(rid).await?))
}

/// POST /api/restaurants/{rid}/areas
pub async fn create_area(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Json(payload): Json<AreaCreate>,
) -> Created<Area> {
    Ok(created(state.admin.create_area(rid, payload).await?))
}

/// PUT /api/restaurants/{rid}/areas/{area_id}
pub async fn update_area(
    State(state): State<ServerState>,
    Path((rid, area_id)): Path<(i64, i64)>,
    Json(payload): Json<AreaUpdate>,
) -> AppResult<Json<ApiResponse<Area>>> {
    Ok(ok(state.admin.update_area(rid, area_id, payload).await?))
}

/// GET /api/restaurants/{rid}/tables
pub async fn list_tables(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<DiningTable>>>> {
    state.admin.restaurant(rid).await?;
    Ok(ok(state.admin.tables(rid).await?))
}

/// POST /api/restaurants/{rid}/tables - 区域容量随之重算
pub async fn create_table(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Json(payload): Json<DiningTableCreate>,
) -> Created<DiningTable> {
    Ok(created(state.admin.create_table(rid, payload).await?))
}

/// PUT /api/restaurants/{rid}/tables/{table_id} - 新旧区域容量都会重算
pub async fn update_table(
    State(state): State<ServerState>,
    Path((rid, table_id)): Path<(i64, i64)>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    Ok(ok(state.admin.update_table(rid, table_id, payload).await?))
}

/// GET /api/restaurants/{rid}/rules
pub async fn list_rules(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<BusinessRule>>>> {
    state.admin.restaurant(rid).await?;
    Ok(ok(state.admin.rules(rid).await?))
}

/// POST /api/restaurants/{rid}/rules
pub async fn create_rule(
    State(state): State<ServerState>,
    Path(rid): Path<i64>,
    Json(payload): Json<BusinessRuleCreate>,
) -> Created<BusinessRule> {
    Ok(created(state.admin.create_rule(rid, payload).await?))
}

/// PUT /api/restaurants/{rid}/rules/{rule_id}
pub async fn update_rule(
    State(state): State<ServerState>,
    Path((rid, rule_id)): Path<(i64, i64)>,
    Json(payload): Json<BusinessRuleUpdate>,
) -> AppResult<Json<ApiResponse<BusinessRule>>> {
    Ok(ok(state.admin.update_rule(rid, rule_id, payload).await?))
}
