//! Unified error system for the employee service
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and field errors
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Employee errors
//! - 2xxx: Upload errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//! use shared::response::ApiResponse;
//!
//! let err = AppError::new(ErrorCode::EmployeeNotFound);
//!
//! let err = AppError::validation("Missing required field")
//!     .with_field_error("email", "Email is required");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert!(!response.is_ok);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
