//! Services Module
//!
//! - [`UploadStore`] - 上传文件的校验、存储与清理

pub mod file_storage;

pub use file_storage::{UploadKind, UploadStore};
