//! Employee model and repository input types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "active" => Some(EmployeeStatus::Active),
            "inactive" => Some(EmployeeStatus::Inactive),
            _ => None,
        }
    }
}

/// Employee row. A non-null `deleted_at` marks the row as soft-deleted;
/// such rows are invisible to the default lookup and list paths.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub position: String,
    pub salary: i64,
    pub status: String,
    pub hired_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating an employee, built only from validated fields.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub position: String,
    pub salary: i64,
    pub status: EmployeeStatus,
    pub hired_at: Option<NaiveDate>,
}

/// Input for updating an employee. Required fields are always resupplied;
/// `None` on the optional fields keeps the stored value.
#[derive(Debug, Clone)]
pub struct EmployeeChanges {
    pub name: String,
    pub email: String,
    pub position: String,
    pub salary: i64,
    pub status: Option<EmployeeStatus>,
    pub hired_at: Option<NaiveDate>,
}

/// Filter parameters for listing employees.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Normalized pagination request.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

/// One page of employees plus the pre-pagination match count.
#[derive(Debug, Clone)]
pub struct EmployeePage {
    pub items: Vec<Employee>,
    pub total: i64,
}
