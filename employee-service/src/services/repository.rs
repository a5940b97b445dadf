use crate::models::{
    Employee, EmployeeChanges, EmployeeFilter, EmployeePage, NewEmployee, PageRequest,
};
use async_trait::async_trait;
use service_core::error::AppError;
use uuid::Uuid;

pub const EMAIL_TAKEN: &str = "The email has already been taken.";

/// Uniqueness failures surface as field-level validation errors, not
/// conflicts, so a lost insert race reads the same as a failed pre-check.
pub fn duplicate_email() -> AppError {
    AppError::validation_field("email", EMAIL_TAKEN)
}

/// Storage seam for the employees table.
///
/// Soft-deleted rows are invisible to every method except `email_in_use`,
/// which scans the whole table: email uniqueness deliberately spans
/// soft-deleted rows as well.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn insert(&self, input: NewEmployee) -> Result<Employee, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError>;

    async fn list_filtered(
        &self,
        filter: &EmployeeFilter,
        page: &PageRequest,
    ) -> Result<EmployeePage, AppError>;

    /// Returns `None` when no non-deleted row matches the id.
    async fn update_partial(
        &self,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, AppError>;

    /// Marks the row deleted without removing it. Returns `false` when no
    /// non-deleted row matched.
    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError>;

    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, AppError>;
}
