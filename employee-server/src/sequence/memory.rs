//! In-process [`SequenceStore`], state is lost on restart

use async_trait::async_trait;
use dashmap::DashMap;

use super::SequenceStore;
use crate::db::repository::{RepoError, RepoResult};

#[derive(Debug, Default)]
pub struct MemorySequenceStore {
    counters: DashMap<String, u64>,
}

impl MemorySequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose `series` has already handed out `value`
    pub fn starting_at(series: impl Into<String>, value: u64) -> Self {
        let store = Self::new();
        store.counters.insert(series.into(), value);
        store
    }

    pub fn current(&self, series: &str) -> u64 {
        self.counters.get(series).map(|v| *v).unwrap_or(0)
    }
}

#[async_trait]
impl SequenceStore for MemorySequenceStore {
    async fn increment_and_get(&self, series: &str) -> RepoResult<u64> {
        if series.trim().is_empty() {
            return Err(RepoError::Validation("Series name must not be empty".to_string()));
        }
        // entry 持有分片写锁，读改写是原子的
        let mut entry = self.counters.entry(series.to_string()).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }
}
