//! PostgreSQL-backed employee repository.

use crate::models::{
    Employee, EmployeeChanges, EmployeeFilter, EmployeePage, NewEmployee, PageRequest,
};
use crate::services::repository::{duplicate_email, EmployeeRepository};
use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

const EMPLOYEE_COLUMNS: &str =
    "id, name, email, position, salary, status, hired_at, created_at, updated_at, deleted_at";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "employee-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for Database {
    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn insert(&self, input: NewEmployee) -> Result<Employee, AppError> {
        let id = Uuid::new_v4();
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees (id, name, email, position, salary, status, hired_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {EMPLOYEE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.position)
        .bind(input.salary)
        .bind(input.status.as_str())
        .bind(input.hired_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => duplicate_email(),
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to insert employee: {}", e)),
        })?;

        info!(employee_id = %employee.id, "Employee created");

        Ok(employee)
    }

    #[instrument(skip(self), fields(employee_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            SELECT {EMPLOYEE_COLUMNS}
            FROM employees
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to find employee: {}", e)))?;

        Ok(employee)
    }

    #[instrument(skip(self, filter, page))]
    async fn list_filtered(
        &self,
        filter: &EmployeeFilter,
        page: &PageRequest,
    ) -> Result<EmployeePage, AppError> {
        let pattern = filter.search.as_ref().map(|s| format!("%{}%", s));
        // An absurdly large page saturates and reads past the end.
        let offset = (page.page - 1).saturating_mul(page.per_page);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM employees
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR email ILIKE $2)
            "#,
        )
        .bind(&filter.status)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to count employees: {}", e))
        })?;

        let items = sqlx::query_as::<_, Employee>(&format!(
            r#"
            SELECT {EMPLOYEE_COLUMNS}
            FROM employees
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR email ILIKE $2)
            ORDER BY created_at, id
            LIMIT $3 OFFSET $4
            "#,
        ))
        .bind(&filter.status)
        .bind(&pattern)
        .bind(page.per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list employees: {}", e)))?;

        Ok(EmployeePage { items, total })
    }

    #[instrument(skip(self, changes), fields(employee_id = %id))]
    async fn update_partial(
        &self,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, AppError> {
        let status = changes.status.map(|s| s.as_str());

        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees
            SET name = $2,
                email = $3,
                position = $4,
                salary = $5,
                status = COALESCE($6, status),
                hired_at = COALESCE($7, hired_at),
                updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {EMPLOYEE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.position)
        .bind(changes.salary)
        .bind(status)
        .bind(changes.hired_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => duplicate_email(),
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to update employee: {}", e)),
        })?;

        if employee.is_some() {
            info!(employee_id = %id, "Employee updated");
        }

        Ok(employee)
    }

    #[instrument(skip(self), fields(employee_id = %id))]
    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET deleted_at = now(), updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to delete employee: {}", e))
        })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(employee_id = %id, "Employee soft-deleted");
        }

        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        // Scans the whole table, including soft-deleted rows.
        let in_use: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM employees
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to check email: {}", e)))?;

        Ok(in_use)
    }
}
