//! Sequence Allocator
//!
//! Hands out human-readable identifiers (`BWEB001`, `BWEB002`, ...) from
//! named monotonic counters. The counter itself lives behind
//! [`SequenceStore`]; the allocator only formats.
//!
//! Values are never reused: a value handed to a caller whose later write
//! fails stays consumed.

mod memory;

pub use memory::MemorySequenceStore;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::db::repository::{RepoError, RepoResult};

/// Durable named counters
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Atomically add one to `series` and return the new value.
    ///
    /// A series that was never used behaves as 0, so its first value is 1.
    /// Concurrent callers on the same series always observe distinct values.
    async fn increment_and_get(&self, series: &str) -> RepoResult<u64>;
}

/// One configured identifier series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSeries {
    /// Counter name, e.g. `employeeId`
    pub name: String,
    /// Literal prefix, e.g. `BWEB`
    pub prefix: String,
    /// Minimum digit count, left-padded with zeros
    pub width: usize,
}

/// `prefix` + `value` left-padded with zeros to `width` digits.
///
/// Values wider than `width` are kept whole: `("EMP", 1000, 3)` gives `EMP1000`.
pub fn format_sequence_id(prefix: &str, value: u64, width: usize) -> String {
    format!("{prefix}{value:0width$}")
}

#[derive(Clone)]
pub struct IdAllocator {
    store: Arc<dyn SequenceStore>,
}

impl IdAllocator {
    pub fn new(store: Arc<dyn SequenceStore>) -> Self {
        Self { store }
    }

    /// Next identifier in `series`
    pub async fn allocate(&self, series: &str, prefix: &str, pad_width: usize) -> RepoResult<String> {
        if series.trim().is_empty() {
            return Err(RepoError::Validation("Series name must not be empty".to_string()));
        }
        let value = self.store.increment_and_get(series).await?;
        Ok(format_sequence_id(prefix, value, pad_width))
    }

    pub async fn allocate_for(&self, series: &IdSeries) -> RepoResult<String> {
        self.allocate(&series.name, &series.prefix, series.width).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_format_pads_without_truncating() {
        assert_eq!(format_sequence_id("EMP", 1, 3), "EMP001");
        assert_eq!(format_sequence_id("EMP", 42, 3), "EMP042");
        assert_eq!(format_sequence_id("EMP", 1000, 3), "EMP1000");
        assert_eq!(format_sequence_id("", 7, 0), "7");
    }

    #[tokio::test]
    async fn test_first_allocation() {
        let allocator = IdAllocator::new(Arc::new(MemorySequenceStore::new()));
        assert_eq!(allocator.allocate("employeeId", "EMP", 3).await.unwrap(), "EMP001");
        assert_eq!(allocator.allocate("employeeId", "EMP", 3).await.unwrap(), "EMP002");
    }

    #[tokio::test]
    async fn test_width_overflow() {
        let store = MemorySequenceStore::starting_at("employeeId", 999);
        let allocator = IdAllocator::new(Arc::new(store));
        assert_eq!(allocator.allocate("employeeId", "EMP", 3).await.unwrap(), "EMP1000");
    }

    #[tokio::test]
    async fn test_allocate_for_series() {
        let allocator = IdAllocator::new(Arc::new(MemorySequenceStore::new()));
        let series = IdSeries {
            name: "employeeId".into(),
            prefix: "BWEB".into(),
            width: 3,
        };
        assert_eq!(allocator.allocate_for(&series).await.unwrap(), "BWEB001");
    }

    #[tokio::test]
    async fn test_empty_series_rejected() {
        let allocator = IdAllocator::new(Arc::new(MemorySequenceStore::new()));
        assert!(matches!(
            allocator.allocate("", "EMP", 3).await,
            Err(RepoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_allocations_are_unique() {
        let allocator = IdAllocator::new(Arc::new(MemorySequenceStore::new()));
        let tasks = (0..100).map(|_| {
            let allocator = allocator.clone();
            tokio::spawn(async move { allocator.allocate("employeeId", "EMP", 3).await.unwrap() })
        });
        let ids: HashSet<String> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.contains("EMP001"));
        assert!(ids.contains("EMP100"));
    }
}
