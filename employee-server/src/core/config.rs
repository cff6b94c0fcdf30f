use std::path::PathBuf;

use crate::sequence::IdSeries;

/// 服务器配置 - 员工管理服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | UPLOADS_DIR | {WORK_DIR}/uploads | 上传文件目录 |
/// | DATABASE_DIR | {WORK_DIR}/database | 数据库目录 |
/// | DB_NAMESPACE | ems | SurrealDB namespace |
/// | DB_NAME | employees | SurrealDB database |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (unset) | 日志文件目录 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | STORAGE_TIMEOUT_MS | 5000 | 单次存储操作超时(毫秒) |
/// | MAX_UPLOAD_BYTES | 5242880 | 单个上传文件上限 |
/// | EMPLOYEE_ID_SERIES | employeeId | 员工编号序列名 |
/// | EMPLOYEE_ID_PREFIX | BWEB | 员工编号前缀 |
/// | EMPLOYEE_ID_WIDTH | 3 | 员工编号最小位数 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/ems HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、上传文件等
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 上传文件目录 (未设置时为 work_dir/uploads)
    pub uploads_dir: Option<String>,
    /// 数据库目录 (未设置时为 work_dir/database)
    pub database_dir: Option<String>,
    /// SurrealDB namespace
    pub db_namespace: String,
    /// SurrealDB database
    pub db_name: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 存储操作超时时间 (毫秒)
    pub storage_timeout_ms: u64,
    /// 单个上传文件最大字节数
    pub max_upload_bytes: usize,
    /// 员工编号序列
    pub employee_id: IdSeries,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_or("HTTP_PORT", 5000),
            uploads_dir: std::env::var("UPLOADS_DIR").ok(),
            database_dir: std::env::var("DATABASE_DIR").ok(),
            db_namespace: std::env::var("DB_NAMESPACE").unwrap_or_else(|_| "ems".into()),
            db_name: std::env::var("DB_NAME").unwrap_or_else(|_| "employees".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30_000),
            storage_timeout_ms: env_or("STORAGE_TIMEOUT_MS", 5_000),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 5 * 1024 * 1024),
            employee_id: IdSeries {
                name: std::env::var("EMPLOYEE_ID_SERIES").unwrap_or_else(|_| "employeeId".into()),
                prefix: std::env::var("EMPLOYEE_ID_PREFIX").unwrap_or_else(|_| "BWEB".into()),
                width: env_or("EMPLOYEE_ID_WIDTH", 3),
            },
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.uploads_dir = None;
        config.database_dir = None;
        config
    }

    /// 上传文件目录
    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&self.work_dir).join("uploads"))
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        self.database_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&self.work_dir).join("database"))
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.uploads_dir())?;
        std::fs::create_dir_all(self.database_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
