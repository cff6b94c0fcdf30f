//! Shared types for the employee management service
//!
//! Common types used by the server and any client crate: error codes,
//! the JSON response envelope and the employee wire DTOs.

pub mod error;
pub mod models;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::ApiResponse;
