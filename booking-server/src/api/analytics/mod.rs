//! Analytics API 模块 (数据统计)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new().route("/{rid}/analytics", get(handler::summary))
}
