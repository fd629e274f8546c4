//! Dining Table API 模块 (桌台状态)
//!
//! 路径相对于 `/api/restaurants`。桌台的创建走 [`super::restaurants`]。

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{rid}/tables/status", get(handler::status))
        .route("/{rid}/tables/{table_id}/maintenance", put(handler::set_maintenance))
}
