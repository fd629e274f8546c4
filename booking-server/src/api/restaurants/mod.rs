//! Restaurant API 模块 (餐厅配置管理)
//!
//! 路径相对于 `/api/restaurants`。

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{rid}", get(handler::get_by_id).put(handler::update))
        .route("/{rid}/settings", get(handler::get_settings).put(handler::update_settings))
        .route("/{rid}/hours", get(handler::list_hours))
        .route("/{rid}/hours/weekly", put(handler::set_weekly_hours))
        .route("/{rid}/hours/special", put(handler::set_special_day))
        .route("/{rid}/areas", get(handler::list_areas).post(handler::create_area))
        .route("/{rid}/areas/{area_id}", put(handler::update_area))
        .route("/{rid}/tables", get(handler::list_tables).post(handler::create_table))
        .route("/{rid}/tables/{table_id}", put(handler::update_table))
        .route("/{rid}/rules", get(handler::list_rules).post(handler::create_rule))
        .route("/{rid}/rules/{rule_id}", put(handler::update_rule))
}
