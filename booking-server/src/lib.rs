//! Booking Server - 餐厅预订与桌台分配服务
//!
//! # 架构概述
//!
//! - **预订引擎** (`booking`): 营业日历、业务规则、桌台分配、预订状态机、no-show 扫描
//! - **数据统计** (`analytics`): 按周期聚合预订数据
//! - **数据库** (`db`): SQLite (sqlx) 存储与迁移
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、后台任务、HTTP 服务器
//! ├── booking/       # 预订引擎
//! ├── analytics/     # 数据统计
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、时区、校验
//! └── db/            # 数据库层
//! ```

pub mod analytics;
pub mod api;
pub mod booking;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use analytics::AnalyticsService;
pub use booking::{ReservationManager, RestaurantAdmin};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 .env、读取配置、初始化日志
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
    ____              __   _
   / __ )____  ____  / /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/ /_/\__, /
                               /____/
    "#
    );
}
