//! Counter Repository
//!
//! SurrealDB-backed [`SequenceStore`]. Each series is one `counter` record,
//! bumped with a single `UPSERT ... seq += 1` statement.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use surrealdb::RecordId;
use tokio::sync::Mutex;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{COUNTER_TABLE, Counter};
use crate::sequence::SequenceStore;

#[derive(Clone)]
pub struct CounterRepository {
    base: BaseRepository,
    /// 每个序列一把锁，避免同一记录上的事务冲突
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl CounterRepository {
    pub fn new(base: BaseRepository) -> Self {
        Self {
            base,
            locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, series: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(series.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Current value of a series without advancing it (0 if never used)
    pub async fn current(&self, series: &str) -> RepoResult<u64> {
        let mut result = self
            .base
            .timed(
                self.base
                    .db()
                    .query("SELECT * FROM $counter")
                    .bind(("counter", RecordId::from_table_key(COUNTER_TABLE, series))),
            )
            .await?;
        let counters: Vec<Counter> = result.take(0)?;
        Ok(counters.first().map(|c| c.seq).unwrap_or(0))
    }
}

#[async_trait]
impl SequenceStore for CounterRepository {
    async fn increment_and_get(&self, series: &str) -> RepoResult<u64> {
        if series.trim().is_empty() {
            return Err(RepoError::Validation("Series name must not be empty".to_string()));
        }

        let lock = self.lock_for(series);
        let _guard = lock.lock().await;

        // 不存在时 seq 视为 0，创建并自增为 1
        let mut result = self
            .base
            .timed(
                self.base
                    .db()
                    .query("UPSERT $counter SET name = $name, seq += 1 RETURN AFTER")
                    .bind(("counter", RecordId::from_table_key(COUNTER_TABLE, series)))
                    .bind(("name", series.to_string())),
            )
            .await?;
        let counter: Option<Counter> = result.take(0)?;
        let counter = counter.ok_or_else(|| {
            RepoError::StorageUnavailable(format!("Counter '{}' was not written", series))
        })?;

        tracing::debug!(series, seq = counter.seq, "Sequence advanced");
        Ok(counter.seq)
    }
}
