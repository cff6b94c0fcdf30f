//! Employee Model

use serde::{Deserialize, Serialize};
use shared::models::{EmployeeInput, EmployeeStatus, Gender};
use shared::types::Timestamp;

pub const EMPLOYEE_TABLE: &str = "employee";

/// Persisted employee record
///
/// The record key is the allocated `customId`, so the SurrealDB `id` field is
/// ignored on read and never written.
/// API clients address an employee by `customId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub custom_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub state: String,
    pub city: String,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub date_of_joining: Option<String>,
    /// Stored file name of the profile image
    #[serde(default)]
    pub image: Option<String>,
    /// Stored file name of the resume
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub status: EmployeeStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Employee {
    /// Build a new record from a validated create payload.
    ///
    /// Returns `None` when a required field is absent; callers run
    /// `validate_for_create` first.
    pub fn from_input(
        custom_id: String,
        input: EmployeeInput,
        image: Option<String>,
        resume: Option<String>,
        now: Timestamp,
    ) -> Option<Self> {
        Some(Self {
            custom_id,
            first_name: input.first_name?,
            last_name: input.last_name?,
            email: input.email?,
            phone: input.phone?,
            country: input.country?,
            state: input.state?,
            city: input.city?,
            pincode: input.pincode,
            address: input.address,
            gender: input.gender?,
            department: input.department,
            position: input.position,
            salary: input.salary,
            date_of_joining: input.date_of_joining,
            image,
            resume,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Text value of a searchable field, by its wire name
    pub fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "customId" => Some(&self.custom_id),
            "firstName" => Some(&self.first_name),
            "lastName" => Some(&self.last_name),
            "email" => Some(&self.email),
            "phone" => Some(&self.phone),
            "city" => Some(&self.city),
            "state" => Some(&self.state),
            "country" => Some(&self.country),
            "pincode" => self.pincode.as_deref(),
            "address" => self.address.as_deref(),
            "department" => self.department.as_deref(),
            "position" => self.position.as_deref(),
            "dateOfJoining" => self.date_of_joining.as_deref(),
            _ => None,
        }
    }

    /// Stored upload file names referenced by this record
    pub fn file_refs(&self) -> Vec<String> {
        self.image.iter().chain(self.resume.iter()).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EmployeeInput {
        EmployeeInput {
            first_name: Some("Asha".into()),
            last_name: Some("Rao".into()),
            email: Some("asha@example.com".into()),
            phone: Some("9876543210".into()),
            country: Some("India".into()),
            state: Some("Gujarat".into()),
            city: Some("Surat".into()),
            gender: Some(Gender::Female),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_input_sets_timestamps_and_default_status() {
        let employee =
            Employee::from_input("BWEB001".into(), input(), None, None, 1_700_000_000_000).unwrap();
        assert_eq!(employee.custom_id, "BWEB001");
        assert_eq!(employee.created_at, employee.updated_at);
        assert_eq!(employee.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_from_input_requires_fields() {
        let partial = EmployeeInput {
            city: None,
            ..input()
        };
        assert!(Employee::from_input("BWEB001".into(), partial, None, None, 0).is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let employee = Employee::from_input(
            "BWEB002".into(),
            input(),
            Some("image-1-a.jpg".into()),
            None,
            5,
        )
        .unwrap();
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["customId"], "BWEB002");
        assert_eq!(json["firstName"], "Asha");
        assert_eq!(json["createdAt"], 5);
        assert_eq!(employee.file_refs(), vec!["image-1-a.jpg".to_string()]);
    }
}
