//! Unified error codes for the employee service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Employee errors
//! - 2xxx: Upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the React client can
/// switch on them without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 1001,
    /// Email already used by another employee
    EmailExists = 1002,
    /// Custom employee ID already assigned
    CustomIdExists = 1003,

    // ==================== 2xxx: Upload ====================
    /// File too large
    FileTooLarge = 2001,
    /// Unsupported file format
    UnsupportedFileFormat = 2002,
    /// Image could not be decoded
    InvalidImageFile = 2003,
    /// Empty file provided
    EmptyFile = 2004,
    /// File field without a file name
    NoFilename = 2005,
    /// Writing the file failed
    FileStorageFailed = 2006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Backing store unreachable or operation timed out
    StorageUnavailable = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmailExists => "Email already exists",
            ErrorCode::CustomIdExists => "Employee ID already exists",

            // Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::NoFilename => "No filename provided",
            ErrorCode::FileStorageFailed => "File storage failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageUnavailable => "Storage unavailable, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Employee
            1001 => Ok(ErrorCode::EmployeeNotFound),
            1002 => Ok(ErrorCode::EmailExists),
            1003 => Ok(ErrorCode::CustomIdExists),

            // Upload
            2001 => Ok(ErrorCode::FileTooLarge),
            2002 => Ok(ErrorCode::UnsupportedFileFormat),
            2003 => Ok(ErrorCode::InvalidImageFile),
            2004 => Ok(ErrorCode::EmptyFile),
            2005 => Ok(ErrorCode::NoFilename),
            2006 => Ok(ErrorCode::FileStorageFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::StorageUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
