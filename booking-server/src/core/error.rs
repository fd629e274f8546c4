use thiserror::Error;

use crate::utils::AppError;

/// 启动/运行期错误 (HTTP 请求错误走 [`AppError`])
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据库错误: {0}")]
    Database(AppError),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Server 层的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
