//! Repository Module
//!
//! Provides storage operations for SurrealDB tables.

pub mod counter;
pub mod employee;

// Re-exports
pub use counter::CounterRepository;
pub use employee::EmployeeRepository;

use std::fmt;
use std::future::IntoFuture;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Default bound for a single storage round-trip
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Which unique key a write collided with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateKey {
    Email,
    CustomId,
    Other(String),
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateKey::Email => write!(f, "Email already exists"),
            DuplicateKey::CustomId => write!(f, "Employee ID already exists"),
            DuplicateKey::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(DuplicateKey),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Backing store unreachable, failed, or timed out
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violation: "Database index `employee_email` already contains ..."
        // Record id collision:    "Database record `employee:BWEB001` already exists"
        if msg.contains("already contains") || msg.contains("already exists") {
            let key = if msg.contains("employee_email") {
                DuplicateKey::Email
            } else if msg.contains("employee_custom_id") || msg.contains("`employee:") {
                DuplicateKey::CustomId
            } else {
                DuplicateKey::Other(msg)
            };
            return RepoError::Duplicate(key);
        }
        RepoError::StorageUnavailable(msg)
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
    timeout: Duration,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            db,
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Run one storage operation, bounded by the configured timeout
    pub async fn timed<F, T>(&self, op: F) -> RepoResult<T>
    where
        F: IntoFuture<Output = Result<T, surrealdb::Error>>,
    {
        match tokio::time::timeout(self.timeout, op).await {
            Ok(result) => result.map_err(RepoError::from),
            Err(_) => Err(RepoError::StorageUnavailable(format!(
                "storage operation timed out after {}ms",
                self.timeout.as_millis()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_messages() {
        assert_eq!(DuplicateKey::Email.to_string(), "Email already exists");
        assert_eq!(DuplicateKey::CustomId.to_string(), "Employee ID already exists");
        assert_eq!(
            RepoError::Duplicate(DuplicateKey::Email).to_string(),
            "Email already exists"
        );
    }
}
