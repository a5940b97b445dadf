use crate::dtos::{EmployeePayload, ListEmployeesParams};
use crate::models::Employee;
use crate::services::repository::EMAIL_TAKEN;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::{field_messages, AppError};
use service_core::response::{ApiResponse, PageMeta};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

const NOT_FOUND: &str = "Employee not found.";

/// A malformed id cannot match any record, so it reads as not-found.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(NOT_FOUND.to_string()))
}

/// Run the field rules, then merge the repository uniqueness check into the
/// same map. The uniqueness check only runs once the email itself passed
/// its own rules.
async fn validate_payload(
    state: &AppState,
    payload: &EmployeePayload,
    exclude: Option<Uuid>,
) -> Result<(), AppError> {
    let mut errors: BTreeMap<String, String> = payload
        .validate()
        .err()
        .map(|e| field_messages(&e))
        .unwrap_or_default();

    if let Some(email) = payload.email.as_deref() {
        if !errors.contains_key("email") && state.repository.email_in_use(email, exclude).await? {
            errors.insert("email".to_string(), EMAIL_TAKEN.to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(errors))
    }
}

pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<ListEmployeesParams>,
) -> Result<Json<ApiResponse<Vec<Employee>>>, AppError> {
    let filter = params.filter();
    let page = params.page_request();

    let result = state.repository.list_filtered(&filter, &page).await?;
    let meta = PageMeta::compute(
        page.page,
        page.per_page,
        result.total,
        result.items.len() as i64,
    );

    Ok(Json(ApiResponse::page(
        "Employee list retrieved successfully.",
        result.items,
        meta,
    )))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<EmployeePayload>,
) -> Result<(StatusCode, Json<ApiResponse<Employee>>), AppError> {
    validate_payload(&state, &payload, None).await?;

    let employee = state.repository.insert(payload.into_new()).await?;

    tracing::info!(employee_id = %employee.id, "Employee created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Employee created successfully.",
            employee,
        )),
    ))
}

pub async fn show_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Employee>>, AppError> {
    let id = parse_id(&id)?;

    let employee = state
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Employee retrieved successfully.",
        employee,
    )))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<ApiResponse<Employee>>, AppError> {
    let id = parse_id(&id)?;

    // Lookup happens before validation: a missing record 404s even when the
    // payload is also invalid.
    state
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    validate_payload(&state, &payload, Some(id)).await?;

    let employee = state
        .repository
        .update_partial(id, payload.into_changes())
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    tracing::info!(employee_id = %employee.id, "Employee updated");

    Ok(Json(ApiResponse::success(
        "Employee updated successfully.",
        employee,
    )))
}

pub async fn destroy_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&id)?;

    if !state.repository.soft_delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }

    tracing::info!(employee_id = %id, "Employee soft-deleted");

    Ok(Json(ApiResponse::message("Employee deleted successfully.")))
}
