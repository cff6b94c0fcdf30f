//! API Response types
//!
//! Every endpoint answers with the same envelope:
//! ```json
//! {
//!     "isOk": true,
//!     "message": "Employee created successfully",
//!     "count": 2,
//!     "data": [ ... ]
//! }
//! ```
//! `count` is only present on list responses; `code` and `errors` only on failures.

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub is_ok: bool,
    /// Error code (failures only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of items in `data` (list responses only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Response data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Field-level validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            is_ok: true,
            code: None,
            message: None,
            count: None,
            data: Some(data),
            errors: None,
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Create a list response; `count` mirrors the number of items
    pub fn list(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len()),
            ..Self::ok(items)
        }
    }
}

impl ApiResponse<()> {
    /// Create a successful response that only carries a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            is_ok: true,
            code: None,
            message: Some(message.into()),
            count: None,
            data: None,
            errors: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            is_ok: false,
            code: Some(err.code),
            message: Some(err.message.clone()),
            count: None,
            data: None,
            errors: err.errors.clone(),
        }
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            Some(code) if !self.is_ok => code.http_status(),
            _ => http::StatusCode::OK,
        };
        (status, axum::Json(self)).into_response()
    }
}
