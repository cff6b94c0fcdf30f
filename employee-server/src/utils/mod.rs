//! 工具模块
//!
//! - [`error`] - RepoError → AppError 映射
//! - [`logger`] - 日志初始化

pub mod error;
pub mod logger;

pub use logger::{cleanup_old_logs, init_logger, init_logger_with_file};
pub use shared::{AppError, AppResult};
