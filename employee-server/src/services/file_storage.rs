//! Upload Storage
//!
//! 员工头像与简历的落盘、校验和清理

use std::path::{Path, PathBuf};

use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};
use tokio::fs;
use uuid::Uuid;

/// Maximum file size (5MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Which multipart file part a file came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Resume,
}

impl UploadKind {
    /// Multipart field name
    pub fn field(self) -> &'static str {
        match self {
            UploadKind::Image => "image",
            UploadKind::Resume => "resume",
        }
    }

    /// Allowed extensions (lowercase, without dot)
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => &["jpg", "jpeg"],
            UploadKind::Resume => &["pdf", "doc", "docx"],
        }
    }

    fn rejection(self) -> &'static str {
        match self {
            UploadKind::Image => "Only .jpg and .jpeg format allowed!",
            UploadKind::Resume => "Only .pdf, .doc, and .docx format allowed!",
        }
    }
}

/// Flat directory of uploaded files, served under `/uploads/{name}`
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_file_size: usize,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, max_file_size: usize) -> Self {
        Self {
            dir: dir.into(),
            max_file_size,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check size, extension and (for images) that the bytes decode.
    ///
    /// Returns the normalized extension.
    pub fn validate(&self, kind: UploadKind, filename: &str, data: &[u8]) -> AppResult<String> {
        if data.is_empty() {
            return Err(AppError::with_message(ErrorCode::EmptyFile, "Empty file provided")
                .with_field_error(kind.field(), "Empty file provided"));
        }

        if data.len() > self.max_file_size {
            return Err(AppError::with_message(
                ErrorCode::FileTooLarge,
                format!(
                    "File too large. Maximum size is {} bytes ({}MB)",
                    self.max_file_size,
                    self.max_file_size / 1024 / 1024
                ),
            ));
        }

        let ext = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();
        if !kind.allowed_extensions().contains(&ext.as_str()) {
            return Err(
                AppError::with_message(ErrorCode::UnsupportedFileFormat, kind.rejection())
                    .with_field_error(kind.field(), kind.rejection()),
            );
        }

        // Verify it's actually an image by trying to load it
        if kind == UploadKind::Image
            && let Err(e) = image::load_from_memory(data)
        {
            return Err(AppError::with_message(
                ErrorCode::InvalidImageFile,
                format!("Invalid image file ({}): {}", ext, e),
            )
            .with_field_error(kind.field(), "Invalid image file"));
        }

        Ok(ext)
    }

    /// Write a file already accepted by [`UploadStore::validate`]
    ///
    /// `ext` is the extension `validate` returned. Stored names look like
    /// `image-1718000000000-<uuid>.jpg`.
    pub async fn write(
        &self,
        kind: UploadKind,
        filename: &str,
        ext: &str,
        data: &[u8],
    ) -> AppResult<String> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to create uploads directory: {}", e),
            )
        })?;

        let stored = format!(
            "{}-{}-{}.{}",
            kind.field(),
            now_millis(),
            Uuid::new_v4().simple(),
            ext
        );
        fs::write(self.dir.join(&stored), data).await.map_err(|e| {
            AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to save file: {}", e),
            )
        })?;

        tracing::info!(
            original_name = %filename,
            stored_name = %stored,
            size = data.len(),
            "File uploaded successfully"
        );
        Ok(stored)
    }

    /// Resolve a stored name to a path inside the upload directory
    ///
    /// Rejects names carrying path separators or `..`.
    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
            return None;
        }
        Some(self.dir.join(name))
    }

    /// 删除文件，失败只记录日志
    pub async fn remove(&self, name: &str) -> bool {
        let Some(path) = self.path_of(name) else {
            tracing::warn!(file = %name, "Refusing to delete file outside uploads directory");
            return false;
        };
        match fs::remove_file(&path).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "Failed to delete uploaded file");
                false
            }
        }
    }

    /// Best-effort removal of several files, returns how many were deleted
    pub async fn remove_all(&self, names: &[String]) -> usize {
        let mut deleted_count = 0;
        for name in names {
            if self.remove(name).await {
                deleted_count += 1;
            }
        }
        if deleted_count > 0 {
            tracing::info!(count = deleted_count, "Uploaded files cleaned up");
        }
        deleted_count
    }
}
