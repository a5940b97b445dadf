use crate::models::{EmployeeChanges, EmployeeFilter, EmployeeStatus, NewEmployee, PageRequest};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

/// Request body for create and update. Every field is optional at the serde
/// level so that a missing required field surfaces as a field-level
/// validation error instead of a body rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct EmployeePayload {
    #[validate(
        required(message = "The name field is required."),
        length(
            max = 100,
            message = "The name field must not be greater than 100 characters."
        )
    )]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub name: Option<String>,
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field must be a valid email address.")
    )]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email: Option<String>,
    #[validate(required(message = "The position field is required."))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub position: Option<String>,
    #[validate(
        required(message = "The salary field is required."),
        range(
            min = 2_000_000,
            max = 50_000_000,
            message = "The salary field must be between 2000000 and 50000000."
        )
    )]
    pub salary: Option<i64>,
    #[validate(custom(function = validate_status))]
    pub status: Option<String>,
    pub hired_at: Option<NaiveDate>,
}

/// Blank or whitespace-only strings deserialize to `None`, so the required
/// rule reports them as missing instead of letting them persist.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if EmployeeStatus::from_string(status).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("status");
    error.message = Some("The selected status is invalid.".into());
    Err(error)
}

impl EmployeePayload {
    fn parsed_status(&self) -> Option<EmployeeStatus> {
        self.status.as_deref().and_then(EmployeeStatus::from_string)
    }

    /// Build the insert input from a validated payload. Status defaults to
    /// active when omitted.
    pub fn into_new(self) -> NewEmployee {
        let status = self.parsed_status().unwrap_or(EmployeeStatus::Active);
        NewEmployee {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
            salary: self.salary.unwrap_or_default(),
            status,
            hired_at: self.hired_at,
        }
    }

    /// Build the update input from a validated payload. Omitted optional
    /// fields keep their stored values; status is not re-defaulted.
    pub fn into_changes(self) -> EmployeeChanges {
        let status = self.parsed_status();
        EmployeeChanges {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
            salary: self.salary.unwrap_or_default(),
            status,
            hired_at: self.hired_at,
        }
    }
}

/// Query parameters for the list endpoint. `per_page` and `page` arrive as
/// raw strings so malformed values can be coerced instead of rejected.
#[derive(Debug, Deserialize)]
pub struct ListEmployeesParams {
    pub status: Option<String>,
    pub search: Option<String>,
    pub per_page: Option<String>,
    pub page: Option<String>,
}

impl ListEmployeesParams {
    /// Non-numeric or non-positive values fall back to the defaults
    /// (page 1, 10 items per page). No upper cap is enforced.
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: parse_positive(self.page.as_deref(), 1),
            per_page: parse_positive(self.per_page.as_deref(), 10),
        }
    }

    pub fn filter(&self) -> EmployeeFilter {
        EmployeeFilter {
            status: none_if_empty(&self.status),
            search: none_if_empty(&self.search),
        }
    }
}

fn parse_positive(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn none_if_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_pagination_params_fall_back_to_defaults() {
        assert_eq!(parse_positive(Some("0"), 10), 10);
        assert_eq!(parse_positive(Some("-5"), 10), 10);
        assert_eq!(parse_positive(Some("abc"), 10), 10);
        assert_eq!(parse_positive(None, 10), 10);
        assert_eq!(parse_positive(Some("25"), 10), 25);
    }

    #[test]
    fn empty_filter_values_are_ignored() {
        let params = ListEmployeesParams {
            status: Some("  ".to_string()),
            search: Some("alice".to_string()),
            per_page: None,
            page: None,
        };
        let filter = params.filter();
        assert_eq!(filter.status, None);
        assert_eq!(filter.search.as_deref(), Some("alice"));
    }

    #[test]
    fn missing_required_fields_are_reported_per_field() {
        let payload = EmployeePayload {
            name: None,
            email: None,
            position: Some("Engineer".to_string()),
            salary: Some(3_000_000),
            status: None,
            hired_at: None,
        };
        let errors = payload.validate().expect_err("payload is invalid");
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("position"));
    }

    #[test]
    fn blank_strings_fail_the_required_rules() {
        let payload: EmployeePayload = serde_json::from_value(serde_json::json!({
            "name": "  ",
            "email": "",
            "position": "",
            "salary": 3_000_000
        }))
        .expect("payload deserializes");
        let errors = payload.validate().expect_err("payload is invalid");
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("position"));
    }

    #[test]
    fn salary_bounds_are_inclusive() {
        let payload = EmployeePayload {
            name: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
            position: Some("Engineer".to_string()),
            salary: Some(2_000_000),
            status: Some("inactive".to_string()),
            hired_at: None,
        };
        assert!(payload.validate().is_ok());
    }
}
