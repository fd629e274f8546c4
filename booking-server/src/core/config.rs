use std::path::PathBuf;

use chrono_tz::Tz;

/// 服务器配置 - 预订服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | DATABASE_PATH | <WORK_DIR>/booking.db | SQLite 数据库文件 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (unset) | 日志文件目录，按天滚动 |
/// | TIMEZONE | Europe/Madrid | 餐厅未设置时区时的默认时区 |
/// | EXPIRY_SWEEP_INTERVAL_SECS | 60 | no-show 扫描间隔(秒) |
/// | ALLOCATION_MAX_ATTEMPTS | 3 | 桌台分配冲突重试次数 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/booking HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// SQLite 数据库路径
    pub database_path: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// 默认时区
    pub timezone: Tz,
    /// no-show 扫描间隔 (秒)
    pub expiry_sweep_interval_secs: u64,
    /// 分配冲突后的最大尝试次数
    pub allocation_max_attempts: u32,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("booking.db")
                .to_string_lossy()
                .into_owned()
        });
        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!(timezone = %name, "Unknown TIMEZONE, using Europe/Madrid");
                chrono_tz::Europe::Madrid
            }),
            Err(_) => chrono_tz::Europe::Madrid,
        };

        Self {
            work_dir,
            database_path,
            http_port: env_or("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_or("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            timezone,
            expiry_sweep_interval_secs: env_or("EXPIRY_SWEEP_INTERVAL_SECS", 60).max(1),
            allocation_max_attempts: env_or("ALLOCATION_MAX_ATTEMPTS", 3).max(1),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30000),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(
        work_dir: impl Into<String>,
        database_path: impl Into<String>,
        http_port: u16,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    /// 确保工作目录存在
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        if let Some(parent) = PathBuf::from(&self.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_keep_remaining_defaults() {
        let config = Config::with_overrides("/tmp/booking", "/tmp/booking/test.db", 0);
        assert_eq!(config.work_dir, "/tmp/booking");
        assert_eq!(config.database_path, "/tmp/booking/test.db");
        assert_eq!(config.http_port, 0);
        assert!(config.allocation_max_attempts >= 1);
        assert!(config.expiry_sweep_interval_secs >= 1);
    }

    #[test]
    fn env_or_falls_back_on_garbage() {
        assert_eq!(env_or::<u16>("BOOKING_TEST_UNSET_VARIABLE", 42), 42);
    }
}
