//! Database Module
//!
//! Handles the embedded SurrealDB (RocksDB) connection and schema

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use repository::{RepoError, RepoResult};

/// Table and index definitions, applied on every start
///
/// The unique indexes back the "Email already exists" and
/// "Employee ID already exists" conflicts.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
DEFINE INDEX IF NOT EXISTS employee_email ON TABLE employee FIELDS email UNIQUE;
DEFINE INDEX IF NOT EXISTS employee_custom_id ON TABLE employee FIELDS customId UNIQUE;
DEFINE TABLE IF NOT EXISTS counter SCHEMALESS;
"#;

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB datastore at `path` and apply the schema
    pub async fn new(path: impl AsRef<Path>, namespace: &str, database: &str) -> RepoResult<Self> {
        let path = path.as_ref();
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| RepoError::StorageUnavailable(format!("Failed to open database: {e}")))?;
        db.use_ns(namespace).use_db(database).await?;

        tracing::info!(
            path = %path.display(),
            namespace,
            database,
            "Database connection established (SurrealDB/RocksDB)"
        );

        db.query(SCHEMA).await?.check()?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}
