//! Employee API Handlers

use axum::extract::{Path, Query, State};
use http::StatusCode;
use shared::models::EmployeeInput;
use shared::util::now_millis;
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use super::form::{EmployeeSubmission, UploadedFile};
use crate::core::ServerState;
use crate::db::models::Employee;
use crate::query::ListParams;
use crate::services::{UploadKind, UploadStore};

fn employee_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::EmployeeNotFound, format!("Employee {} not found", id))
}

/// List employees: `?search=&sorton=&sortdir=`
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<Employee>>> {
    let (filter, sort) = params.build();
    let employees = state.employees().find(&filter, &sort).await?;
    Ok(ApiResponse::list(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Employee>> {
    let employee = state
        .employees()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| employee_not_found(&id))?;
    Ok(ApiResponse::ok(employee))
}

/// Create a new employee
///
/// validate → allocate `customId` → store files → persist. A failed
/// persist removes the stored files; the allocated number is not reused.
pub async fn create(
    State(state): State<ServerState>,
    submission: EmployeeSubmission,
) -> AppResult<(StatusCode, ApiResponse<Employee>)> {
    let input = submission.input.normalized();
    input.validate_for_create()?;
    let (image, resume) = check_files(&state.uploads, submission.image, submission.resume)?;

    let custom_id = state.ids.allocate_for(&state.config.employee_id).await?;

    let (image, resume) = store_files(&state.uploads, image, resume).await?;
    let saved = image.iter().chain(resume.iter()).cloned().collect::<Vec<_>>();

    let Some(employee) =
        Employee::from_input(custom_id.clone(), input, image, resume, now_millis())
    else {
        state.uploads.remove_all(&saved).await;
        return Err(AppError::validation("Missing required fields"));
    };

    match state.employees().create(employee).await {
        Ok(created) => {
            tracing::info!(custom_id = %created.custom_id, "Employee created");
            Ok((
                StatusCode::CREATED,
                ApiResponse::ok_with_message(created, "Employee created successfully"),
            ))
        }
        Err(e) => {
            tracing::warn!(custom_id = %custom_id, error = %e, "Employee create failed");
            state.uploads.remove_all(&saved).await;
            Err(e.into())
        }
    }
}

/// Update an employee (partial merge)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    submission: EmployeeSubmission,
) -> AppResult<ApiResponse<Employee>> {
    let input: EmployeeInput = submission.input.normalized();
    input.validate_for_update()?;
    let (image, resume) = check_files(&state.uploads, submission.image, submission.resume)?;

    let repo = state.employees();
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| employee_not_found(&id))?;

    let (image, resume) = store_files(&state.uploads, image, resume).await?;
    let saved = image.iter().chain(resume.iter()).cloned().collect::<Vec<_>>();

    // 被替换的旧文件，更新成功后清理
    let mut replaced = Vec::new();
    if image.is_some()
        && let Some(old) = &existing.image
    {
        replaced.push(old.clone());
    }
    if resume.is_some()
        && let Some(old) = &existing.resume
    {
        replaced.push(old.clone());
    }

    match repo.update(&id, input, image, resume, now_millis()).await {
        Ok(updated) => {
            state.uploads.remove_all(&replaced).await;
            tracing::info!(custom_id = %updated.custom_id, "Employee updated");
            Ok(ApiResponse::ok_with_message(updated, "Employee updated successfully"))
        }
        Err(e) => {
            state.uploads.remove_all(&saved).await;
            Err(e.into())
        }
    }
}

/// Hard delete an employee and its files
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let removed = state
        .employees()
        .delete(&id)
        .await?
        .ok_or_else(|| employee_not_found(&id))?;

    state.uploads.remove_all(&removed.file_refs()).await;
    tracing::info!(custom_id = %removed.custom_id, "Employee deleted");
    Ok(ApiResponse::message("Employee deleted successfully"))
}

/// A submitted file that passed validation
struct CheckedUpload {
    kind: UploadKind,
    ext: String,
    file: UploadedFile,
}

/// Reject bad files before anything is allocated or written
fn check_files(
    uploads: &UploadStore,
    image: Option<UploadedFile>,
    resume: Option<UploadedFile>,
) -> AppResult<(Option<CheckedUpload>, Option<CheckedUpload>)> {
    Ok((
        check_file(uploads, UploadKind::Image, image)?,
        check_file(uploads, UploadKind::Resume, resume)?,
    ))
}

fn check_file(
    uploads: &UploadStore,
    kind: UploadKind,
    file: Option<UploadedFile>,
) -> AppResult<Option<CheckedUpload>> {
    let Some(file) = file else {
        return Ok(None);
    };
    let ext = uploads.validate(kind, &file.file_name, &file.data)?;
    Ok(Some(CheckedUpload { kind, ext, file }))
}

async fn write_file(uploads: &UploadStore, upload: &CheckedUpload) -> AppResult<String> {
    uploads
        .write(upload.kind, &upload.file.file_name, &upload.ext, &upload.file.data)
        .await
}

/// Write the checked files, returning their stored names
async fn store_files(
    uploads: &UploadStore,
    image: Option<CheckedUpload>,
    resume: Option<CheckedUpload>,
) -> AppResult<(Option<String>, Option<String>)> {
    let image_name = match &image {
        Some(upload) => Some(write_file(uploads, upload).await?),
        None => None,
    };
    let resume_name = match &resume {
        Some(upload) => match write_file(uploads, upload).await {
            Ok(name) => Some(name),
            Err(e) => {
                if let Some(name) = &image_name {
                    uploads.remove(name).await;
                }
                return Err(e);
            }
        },
        None => None,
    };
    Ok((image_name, resume_name))
}
