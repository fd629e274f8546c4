//! API 路由模块
//!
//! 所有业务路由挂在 `/api/restaurants/{rid}` 下，响应统一使用
//! [`ApiResponse`](crate::utils::ApiResponse) 信封。
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`restaurants`] - 餐厅、设置、营业时间、区域、桌台、规则管理
//! - [`reservations`] - 预订生命周期、可用性查询、no-show 扫描
//! - [`tables`] - 桌台状态视图、维护标记
//! - [`analytics`] - 数据统计

pub mod analytics;
pub mod health;
pub mod reservations;
pub mod restaurants;
pub mod tables;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

/// Build the API router (without state)
pub fn router() -> Router<ServerState> {
    let restaurant_scoped = restaurants::routes()
        .merge(reservations::routes())
        .merge(tables::routes())
        .merge(analytics::routes());

    Router::<ServerState>::new()
        .merge(health::router())
        .nest("/api/restaurants", restaurant_scoped)
}
