//! Employee Model

use crate::error::AppError;
use crate::util::to_camel_case;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Employee gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Male" | "male" => Ok(Gender::Male),
            "Female" | "female" => Ok(Gender::Female),
            "Other" | "other" => Ok(Gender::Other),
            other => Err(format!("Unknown gender '{other}'")),
        }
    }
}

/// Employment status flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Active" | "active" => Ok(EmployeeStatus::Active),
            "Inactive" | "inactive" => Ok(EmployeeStatus::Inactive),
            other => Err(format!("Unknown status '{other}'")),
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeStatus::Active => write!(f, "Active"),
            EmployeeStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Create / update employee payload
///
/// Every field is optional on the wire. Create requires the fields listed in
/// [`EmployeeInput::REQUIRED_ON_CREATE`]; update merges whatever is present.
/// File references (`image`, `resume`) are not part of the payload, they come
/// from multipart file parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeInput {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: Option<String>,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: Option<String>,
    #[validate(custom(function = "validate_pincode"))]
    pub pincode: Option<String>,
    #[validate(length(max = 500, message = "Address is too long"))]
    pub address: Option<String>,
    pub gender: Option<Gender>,
    pub department: Option<String>,
    pub position: Option<String>,
    #[validate(range(min = 0.0, message = "Salary must be a non-negative number"))]
    pub salary: Option<f64>,
    #[validate(custom(function = "validate_date"))]
    pub date_of_joining: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeInput {
    /// Fields a new employee must carry, as (rust field, message)
    pub const REQUIRED_ON_CREATE: &'static [(&'static str, &'static str)] = &[
        ("first_name", "First name is required"),
        ("last_name", "Last name is required"),
        ("email", "Email is required"),
        ("phone", "Phone is required"),
        ("country", "Country is required"),
        ("state", "State is required"),
        ("city", "City is required"),
        ("gender", "Please select gender"),
    ];

    /// Validate a payload for the create path
    pub fn validate_for_create(&self) -> Result<(), AppError> {
        let mut errors = self.field_errors();
        for (field, message) in Self::REQUIRED_ON_CREATE {
            if self.is_missing(field) {
                errors
                    .entry(to_camel_case(field))
                    .or_insert_with(|| message.to_string());
            }
        }
        Self::into_result(errors)
    }

    /// Validate a payload for the update path (partial merge)
    pub fn validate_for_update(&self) -> Result<(), AppError> {
        Self::into_result(self.field_errors())
    }

    /// Trim surrounding whitespace and drop blank strings
    pub fn normalized(mut self) -> Self {
        for value in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.email,
            &mut self.phone,
            &mut self.country,
            &mut self.state,
            &mut self.city,
            &mut self.pincode,
            &mut self.address,
            &mut self.department,
            &mut self.position,
            &mut self.date_of_joining,
        ] {
            *value = value
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
        if let Some(email) = self.email.as_mut() {
            *email = email.to_lowercase();
        }
        self
    }

    fn is_missing(&self, field: &str) -> bool {
        match field {
            "first_name" => self.first_name.is_none(),
            "last_name" => self.last_name.is_none(),
            "email" => self.email.is_none(),
            "phone" => self.phone.is_none(),
            "country" => self.country.is_none(),
            "state" => self.state.is_none(),
            "city" => self.city.is_none(),
            "gender" => self.gender.is_none(),
            _ => false,
        }
    }

    fn field_errors(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        if let Err(errors) = self.validate() {
            for (field, list) in errors.field_errors() {
                let message = list
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{} is invalid", to_camel_case(&field)));
                out.insert(to_camel_case(&field), message);
            }
        }
        out
    }

    fn into_result(errors: BTreeMap<String, String>) -> Result<(), AppError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::invalid_fields(errors))
        }
    }
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message(Cow::Borrowed("Phone must be 10 digits")))
    }
}

fn validate_pincode(pincode: &str) -> Result<(), ValidationError> {
    if pincode.len() == 6 && pincode.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("pincode")
            .with_message(Cow::Borrowed("Pincode must be 6 digits")))
    }
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("date")
                .with_message(Cow::Borrowed("Date of joining must be YYYY-MM-DD"))
        })
}
