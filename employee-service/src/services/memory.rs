//! In-memory employee repository. Selected with `DATABASE_BACKEND=memory`;
//! backs the integration test suite and local development without a
//! PostgreSQL instance.

use crate::models::{
    Employee, EmployeeChanges, EmployeeFilter, EmployeePage, NewEmployee, PageRequest,
};
use crate::services::repository::{duplicate_email, EmployeeRepository};
use async_trait::async_trait;
use chrono::Utc;
use service_core::error::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryRepository {
    rows: RwLock<Vec<Employee>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(row: &Employee, filter: &EmployeeFilter) -> bool {
    if row.deleted_at.is_some() {
        return false;
    }
    if let Some(status) = &filter.status {
        if row.status != *status {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        if !row.name.to_lowercase().contains(&needle)
            && !row.email.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    true
}

#[async_trait]
impl EmployeeRepository for MemoryRepository {
    async fn insert(&self, input: NewEmployee) -> Result<Employee, AppError> {
        let mut rows = self.rows.write().await;

        // Uniqueness is re-checked under the write lock, so two concurrent
        // conflicting creates cannot both succeed.
        if rows.iter().any(|r| r.email == input.email) {
            return Err(duplicate_email());
        }

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            position: input.position,
            salary: input.salary,
            status: input.status.as_str().to_string(),
            hired_at: input.hired_at,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(employee.clone());

        Ok(employee)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|r| r.id == id && r.deleted_at.is_none())
            .cloned())
    }

    async fn list_filtered(
        &self,
        filter: &EmployeeFilter,
        page: &PageRequest,
    ) -> Result<EmployeePage, AppError> {
        let rows = self.rows.read().await;
        let matching: Vec<&Employee> = rows.iter().filter(|r| matches(r, filter)).collect();
        let total = matching.len() as i64;

        // An absurdly large page saturates and reads past the end.
        let offset = (page.page - 1).saturating_mul(page.per_page) as usize;
        let items = matching
            .into_iter()
            .skip(offset)
            .take(page.per_page as usize)
            .cloned()
            .collect();

        Ok(EmployeePage { items, total })
    }

    async fn update_partial(
        &self,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, AppError> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|r| r.email == changes.email && r.id != id) {
            return Err(duplicate_email());
        }

        let Some(row) = rows.iter_mut().find(|r| r.id == id && r.deleted_at.is_none()) else {
            return Ok(None);
        };

        row.name = changes.name;
        row.email = changes.email;
        row.position = changes.position;
        row.salary = changes.salary;
        if let Some(status) = changes.status {
            row.status = status.as_str().to_string();
        }
        if let Some(hired_at) = changes.hired_at {
            row.hired_at = Some(hired_at);
        }
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|r| r.id == id && r.deleted_at.is_none()) {
            Some(row) => {
                let now = Utc::now();
                row.deleted_at = Some(now);
                row.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        // Soft-deleted rows count too, same as the unique index in Postgres.
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .any(|r| r.email == email && exclude.map_or(true, |id| r.id != id)))
    }
}
