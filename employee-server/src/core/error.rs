use thiserror::Error;

use crate::db::repository::RepoError;

/// 服务器启动/运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("工作目录初始化失败: {0}")]
    WorkDir(#[from] std::io::Error),

    #[error("数据库初始化失败: {0}")]
    Database(#[from] RepoError),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
