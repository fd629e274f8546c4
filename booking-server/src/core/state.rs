use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::analytics::AnalyticsService;
use crate::booking::{
    BookingStore, BroadcastPublisher, Clock, ExpiryScheduler, MemoryStore, ReservationManager,
    RestaurantAdmin, SqliteStore, SystemClock,
};
use crate::core::error::{Result, ServerError};
use crate::core::event_listener::run_event_log;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::Config;
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，作为 axum `State` 传给每个处理器。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池 (内存模式下为 None) |
/// | manager | 预订状态机 |
/// | admin | 餐厅配置管理 |
/// | analytics | 数据统计 |
/// | events | 预订事件广播 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Option<DbService>,
    pub manager: ReservationManager,
    pub admin: RestaurantAdmin,
    pub analytics: AnalyticsService,
    pub events: BroadcastPublisher,
    pub started_at: Instant,
}

impl ServerState {
    /// 用给定的存储和时钟组装服务
    pub fn from_parts(
        config: Config,
        store: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
        db: Option<DbService>,
    ) -> Self {
        let events = BroadcastPublisher::new();
        let manager = ReservationManager::new(store.clone(), clock.clone(), Arc::new(events.clone()))
            .with_max_attempts(config.allocation_max_attempts)
            .with_default_timezone(config.timezone);
        let admin = RestaurantAdmin::new(store.clone(), clock.clone(), config.timezone);
        let analytics = AnalyticsService::new(store, clock, config.timezone);

        Self {
            config,
            db,
            manager,
            admin,
            analytics,
            events,
            started_at: Instant::now(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录
    /// 2. 数据库 (DATABASE_PATH，自动迁移)
    /// 3. 各服务 (Manager, Admin, Analytics)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir()?;

        let db = DbService::new(&config.database_path)
            .await
            .map_err(ServerError::Database)?;
        let store: Arc<dyn BookingStore> = Arc::new(SqliteStore::new(db.pool.clone()));

        tracing::info!(
            database = %config.database_path,
            timezone = %config.timezone,
            "Server state initialized"
        );
        Ok(Self::from_parts(
            config.clone(),
            store,
            Arc::new(SystemClock),
            Some(db),
        ))
    }

    /// 内存存储 (测试、演示)
    pub fn in_memory(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(config, Arc::new(MemoryStore::new()), clock, None)
    }

    /// 启动后台任务
    ///
    /// - no-show 扫描 (Periodic)
    /// - 预订事件日志 (Listener)
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let scheduler = ExpiryScheduler::new(
            self.manager.clone(),
            Duration::from_secs(self.config.expiry_sweep_interval_secs),
            tasks.shutdown_token(),
        );
        tasks.spawn("expiry_sweep", TaskKind::Periodic, scheduler.run());

        let rx = self.events.subscribe();
        let token = tasks.shutdown_token();
        tasks.spawn("reservation_event_log", TaskKind::Listener, run_event_log(rx, token));

        tasks.log_summary();
        tasks
    }

    /// 数据库连通性检查；内存模式总是 true
    pub async fn database_ok(&self) -> bool {
        match &self.db {
            Some(db) => sqlx::query("SELECT 1").execute(&db.pool).await.is_ok(),
            None => true,
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
