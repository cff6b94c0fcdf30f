//! Employee Server - 员工管理服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB (RocksDB) 存储
//! - **编号分配** (`sequence`): 基于命名计数器的员工编号 (`BWEB001`)
//! - **查询构建** (`query`): 搜索/排序参数 → 过滤条件和排序规则
//! - **HTTP API** (`api`): RESTful 员工增删改查与文件访问
//!
//! # 模块结构
//!
//! ```text
//! employee-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── db/            # 数据库层 (模型、仓储)
//! ├── sequence/      # 编号分配器
//! ├── query/         # 列表查询构建
//! ├── services/      # 上传文件存储
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由与中间件组装
//! ├── middleware/    # 请求日志
//! └── utils/         # 错误映射、日志
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod query;
pub mod routes;
pub mod sequence;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use routes::build_app;
pub use sequence::{IdAllocator, IdSeries, SequenceStore};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use shared::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 设置运行环境: 加载 .env、读取配置、初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    // .env 文件可选
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )?;

    if let Some(dir) = config.log_dir.as_deref()
        && let Err(e) = cleanup_old_logs(std::path::Path::new(dir))
    {
        tracing::warn!(error = %e, "Failed to clean up old log files");
    }

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ______                __
   / ____/___ ___  ____  / /___  __  _____  ___
  / __/ / __ `__ \/ __ \/ / __ \/ / / / _ \/ _ \
 / /___/ / / / / / /_/ / / /_/ / /_/ /  __/  __/
/_____/_/ /_/ /_/ .___/_/\____/\__, /\___/\___/
               /_/            /____/
    "#
    );
}
