//! Application error type and its axum integration

use super::codes::ErrorCode;
use crate::response::ApiResponse;
use http::StatusCode;
use std::collections::BTreeMap;
use thiserror::Error;

/// Application error with structured error code and field-level details
///
/// This is the primary error type for the HTTP layer, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional per-field messages for validation failures
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Offending fields and why (validation failures only)
    pub errors: Option<BTreeMap<String, String>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            errors: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
        }
    }

    /// Add a field error to this error
    pub fn with_field_error(mut self, field: impl Into<String>, reason: impl Into<String>) -> Self {
        self.errors
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), reason.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a validation error listing every offending field
    pub fn invalid_fields(errors: BTreeMap<String, String>) -> Self {
        let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
        let message = format!("Validation failed: {}", fields.join(", "));
        Self {
            code: ErrorCode::ValidationFailed,
            message,
            errors: Some(errors),
        }
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{} not found", resource.into()))
    }

    /// Create a storage unavailable error (transient, retryable)
    pub fn storage_unavailable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageUnavailable, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        let body = ApiResponse::<()>::error(&self);
        (status, Json(body)).into_response()
    }
}
