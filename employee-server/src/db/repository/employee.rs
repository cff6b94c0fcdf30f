//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{EMPLOYEE_TABLE, Employee};
use crate::query::{EmployeeFilter, SortSpec, to_surql};
use serde_json::Value;
use shared::models::EmployeeInput;
use shared::types::Timestamp;
use surrealdb::RecordId;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

/// Record id for an employee path parameter
///
/// Accepts either `employee:BWEB001` or the bare key `BWEB001`.
pub fn employee_record_id(id: &str) -> RecordId {
    let key = id.strip_prefix("employee:").unwrap_or(id);
    RecordId::from_table_key(EMPLOYEE_TABLE, key)
}

impl EmployeeRepository {
    pub fn new(base: BaseRepository) -> Self {
        Self { base }
    }

    /// Find employees matching `filter`, ordered by `sort`
    pub async fn find(&self, filter: &EmployeeFilter, sort: &SortSpec) -> RepoResult<Vec<Employee>> {
        let compiled = to_surql(EMPLOYEE_TABLE, filter, sort)?;
        let mut query = self.base.db().query(compiled.sql);
        if let Some(search) = compiled.search {
            query = query.bind(("search", search));
        }
        let mut result = self.base.timed(query).await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees)
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .timed(
                self.base
                    .db()
                    .query("SELECT * FROM $thing")
                    .bind(("thing", employee_record_id(id))),
            )
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Persist a new employee, keyed by its `customId`
    pub async fn create(&self, employee: Employee) -> RepoResult<Employee> {
        let thing = employee_record_id(&employee.custom_id);
        let mut result = self
            .base
            .timed(
                self.base
                    .db()
                    .query("CREATE $thing CONTENT $data RETURN AFTER")
                    .bind(("thing", thing))
                    .bind(("data", employee)),
            )
            .await?;
        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| RepoError::StorageUnavailable("Failed to create employee".to_string()))
    }

    /// Merge the present fields of `input` into an existing employee
    ///
    /// `customId` and `createdAt` are never touched. `image` / `resume` are
    /// replaced only when a new stored file name is given.
    pub async fn update(
        &self,
        id: &str,
        input: EmployeeInput,
        image: Option<String>,
        resume: Option<String>,
        now: Timestamp,
    ) -> RepoResult<Employee> {
        let patch = build_patch(input, image, resume, now)?;
        let mut result = self
            .base
            .timed(
                self.base
                    .db()
                    .query("UPDATE $thing MERGE $patch RETURN AFTER")
                    .bind(("thing", employee_record_id(id)))
                    .bind(("patch", patch)),
            )
            .await?;
        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Hard delete an employee, returning the removed record
    pub async fn delete(&self, id: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .timed(
                self.base
                    .db()
                    .query("DELETE $thing RETURN BEFORE")
                    .bind(("thing", employee_record_id(id))),
            )
            .await?;
        let removed: Vec<Employee> = result.take(0)?;
        Ok(removed.into_iter().next())
    }
}

/// MERGE document: only the fields the caller sent, plus `updatedAt`
fn build_patch(
    input: EmployeeInput,
    image: Option<String>,
    resume: Option<String>,
    now: Timestamp,
) -> RepoResult<Value> {
    let Value::Object(mut patch) = serde_json::to_value(input)
        .map_err(|e| RepoError::Validation(format!("Invalid update payload: {e}")))?
    else {
        return Err(RepoError::Validation("Invalid update payload".to_string()));
    };
    patch.retain(|_, v| !v.is_null());
    // 标识字段不可修改
    patch.remove("customId");
    patch.remove("createdAt");
    if let Some(image) = image {
        patch.insert("image".into(), Value::String(image));
    }
    if let Some(resume) = resume {
        patch.insert("resume".into(), Value::String(resume));
    }
    patch.insert("updatedAt".into(), Value::from(now));
    Ok(Value::Object(patch))
}
