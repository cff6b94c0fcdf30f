//! Create / update request body
//!
//! Accepts either `multipart/form-data` (text fields plus optional `image`
//! and `resume` file parts) or a plain JSON body without files.

use std::collections::BTreeMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use http::header::CONTENT_TYPE;
use shared::{AppError, ErrorCode};
use shared::models::EmployeeInput;

/// A file part as received
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeSubmission {
    pub input: EmployeeInput,
    pub image: Option<UploadedFile>,
    pub resume: Option<UploadedFile>,
}

impl<S> FromRequest<S> for EmployeeSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Json(input) = Json::<EmployeeInput>::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_request(e.body_text()))?;
            return Ok(Self {
                input,
                ..Default::default()
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_request(e.body_text()))?;

        let mut submission = Self::default();
        let mut errors = BTreeMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "image" | "resume" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
                    // 浏览器在未选择文件时会发送空的文件段
                    if file_name.is_empty() && data.is_empty() {
                        continue;
                    }
                    if file_name.is_empty() {
                        return Err(AppError::new(ErrorCode::NoFilename)
                            .with_field_error(name.as_str(), ErrorCode::NoFilename.message()));
                    }
                    let file = UploadedFile { file_name, data };
                    if name == "image" {
                        submission.image = Some(file);
                    } else {
                        submission.resume = Some(file);
                    }
                }
                _ => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
                    if let Err(message) = apply_text_field(&mut submission.input, &name, value) {
                        errors.insert(name, message);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(submission)
        } else {
            Err(AppError::invalid_fields(errors))
        }
    }
}

/// Copy one form text field into the payload
///
/// Unknown names (`customId`, `createdAt`, `_id` echoed back by an edit
/// form) are ignored.
fn apply_text_field(input: &mut EmployeeInput, name: &str, value: String) -> Result<(), String> {
    let slot = match name {
        "firstName" => &mut input.first_name,
        "lastName" => &mut input.last_name,
        "email" => &mut input.email,
        "phone" => &mut input.phone,
        "country" => &mut input.country,
        "state" => &mut input.state,
        "city" => &mut input.city,
        "pincode" => &mut input.pincode,
        "address" => &mut input.address,
        "department" => &mut input.department,
        "position" => &mut input.position,
        "dateOfJoining" => &mut input.date_of_joining,
        "gender" => {
            input.gender = parse_optional(&value)?;
            return Ok(());
        }
        "status" => {
            input.status = parse_optional(&value)?;
            return Ok(());
        }
        "salary" => {
            input.salary = parse_optional::<f64>(&value)
                .map_err(|_| "Salary must be a number".to_string())?;
            return Ok(());
        }
        _ => return Ok(()),
    };
    *slot = Some(value);
    Ok(())
}

fn parse_optional<T>(value: &str) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<T>().map(Some).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{EmployeeStatus, Gender};

    #[test]
    fn test_apply_text_fields() {
        let mut input = EmployeeInput::default();
        apply_text_field(&mut input, "firstName", "Asha".into()).unwrap();
        apply_text_field(&mut input, "gender", "Female".into()).unwrap();
        apply_text_field(&mut input, "status", "Inactive".into()).unwrap();
        apply_text_field(&mut input, "salary", "52000.5".into()).unwrap();
        apply_text_field(&mut input, "customId", "HACK001".into()).unwrap();

        assert_eq!(input.first_name.as_deref(), Some("Asha"));
        assert_eq!(input.gender, Some(Gender::Female));
        assert_eq!(input.status, Some(EmployeeStatus::Inactive));
        assert_eq!(input.salary, Some(52000.5));
    }

    #[test]
    fn test_bad_values_are_reported() {
        let mut input = EmployeeInput::default();
        assert_eq!(
            apply_text_field(&mut input, "salary", "lots".into()).unwrap_err(),
            "Salary must be a number"
        );
        assert!(apply_text_field(&mut input, "gender", "robot".into()).is_err());
        apply_text_field(&mut input, "salary", "".into()).unwrap();
        assert_eq!(input.salary, None);
    }
}
