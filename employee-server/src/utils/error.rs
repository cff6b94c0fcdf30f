//! 存储层错误到 HTTP 错误的映射
//!
//! | RepoError | ErrorCode | HTTP |
//! |-----------|-----------|------|
//! | NotFound | NotFound | 404 |
//! | Duplicate(Email) | EmailExists | 409 |
//! | Duplicate(CustomId) | CustomIdExists | 409 |
//! | Validation | ValidationFailed | 400 |
//! | StorageUnavailable | StorageUnavailable | 503 |

use shared::{AppError, ErrorCode};

use crate::db::repository::{DuplicateKey, RepoError};

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(key) => {
                let code = match key {
                    DuplicateKey::Email => ErrorCode::EmailExists,
                    DuplicateKey::CustomId => ErrorCode::CustomIdExists,
                    DuplicateKey::Other(_) => ErrorCode::AlreadyExists,
                };
                let message = key.to_string();
                let err = AppError::with_message(code, message.clone());
                match key {
                    DuplicateKey::Email => err.with_field_error("email", message),
                    DuplicateKey::CustomId => err.with_field_error("customId", message),
                    DuplicateKey::Other(_) => err,
                }
            }
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::StorageUnavailable(msg) => AppError::storage_unavailable(msg),
        }
    }
}
