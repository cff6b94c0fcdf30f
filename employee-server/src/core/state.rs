use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::db::repository::{BaseRepository, CounterRepository, EmployeeRepository};
use crate::sequence::{IdAllocator, SequenceStore};
use crate::services::UploadStore;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (句柄或 Arc)，可直接作为 axum `State` 使用。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | ids | IdAllocator | 员工编号分配器 |
/// | uploads | UploadStore | 上传文件存储 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub ids: IdAllocator,
    pub uploads: UploadStore,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录结构
    /// 2. 打开数据库并应用 schema
    /// 3. 构建编号分配器和上传存储
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_service = DbService::new(
            config.database_dir(),
            &config.db_namespace,
            &config.db_name,
        )
        .await?;

        Ok(Self::from_parts(config.clone(), db_service.db))
    }

    /// 用已打开的数据库构建状态
    pub fn from_parts(config: Config, db: Surreal<Db>) -> Self {
        let base = BaseRepository::new(db.clone())
            .with_timeout(Duration::from_millis(config.storage_timeout_ms));
        let counters: Arc<dyn SequenceStore> = Arc::new(CounterRepository::new(base));
        let uploads = UploadStore::new(config.uploads_dir(), config.max_upload_bytes);

        Self {
            config,
            db,
            ids: IdAllocator::new(counters),
            uploads,
        }
    }

    /// Employee repository bound to this state's database
    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.repository_base())
    }

    fn repository_base(&self) -> BaseRepository {
        BaseRepository::new(self.db.clone())
            .with_timeout(Duration::from_millis(self.config.storage_timeout_ms))
    }
}
