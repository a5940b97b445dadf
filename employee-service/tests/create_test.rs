mod common;

use common::{valid_payload, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_returns_201_and_defaults_status_to_active() {
    let app = TestApp::spawn().await;

    let response = app
        .create_employee(&valid_payload("Alice Smith", "alice@example.com"))
        .await;

    assert_eq!(201, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Employee created successfully.");
    assert_eq!(body["data"]["name"], "Alice Smith");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["salary"], 5_000_000);
    assert_eq!(body["data"]["status"], "active");
    assert!(body["data"]["id"].as_str().is_some());
}

#[tokio::test]
async fn create_honors_a_supplied_status() {
    let app = TestApp::spawn().await;

    let mut payload = valid_payload("Bob Jones", "bob@example.com");
    payload["status"] = json!("inactive");
    payload["hired_at"] = json!("2024-03-15");

    let response = app.create_employee(&payload).await;

    assert_eq!(201, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"]["status"], "inactive");
    assert_eq!(body["data"]["hired_at"], "2024-03-15");
}

#[tokio::test]
async fn create_with_missing_name_returns_422_with_a_name_error() {
    let app = TestApp::spawn().await;

    let response = app
        .create_employee(&json!({
            "email": "alice@example.com",
            "position": "Engineer",
            "salary": 5_000_000
        }))
        .await;

    assert_eq!(422, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"]["name"], "The name field is required.");
}

#[tokio::test]
async fn create_with_empty_strings_returns_required_errors() {
    let app = TestApp::spawn().await;

    let response = app
        .create_employee(&json!({
            "name": "",
            "email": "alice@example.com",
            "position": "   ",
            "salary": 5_000_000
        }))
        .await;

    assert_eq!(422, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["errors"]["name"], "The name field is required.");
    assert_eq!(body["errors"]["position"], "The position field is required.");
}

#[tokio::test]
async fn create_with_salary_out_of_range_returns_422() {
    let app = TestApp::spawn().await;

    for salary in [1_999_999i64, 50_000_001] {
        let mut payload = valid_payload("Alice Smith", "alice@example.com");
        payload["salary"] = json!(salary);

        let response = app.create_employee(&payload).await;

        assert_eq!(
            422,
            response.status().as_u16(),
            "salary {} should be rejected",
            salary
        );
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert!(body["errors"]["salary"].as_str().is_some());
    }
}

#[tokio::test]
async fn create_with_invalid_email_format_returns_422() {
    let app = TestApp::spawn().await;

    let response = app
        .create_employee(&valid_payload("Alice Smith", "not-an-email"))
        .await;

    assert_eq!(422, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["errors"]["email"],
        "The email field must be a valid email address."
    );
}

#[tokio::test]
async fn create_with_invalid_status_returns_422() {
    let app = TestApp::spawn().await;

    let mut payload = valid_payload("Alice Smith", "alice@example.com");
    payload["status"] = json!("on_leave");

    let response = app.create_employee(&payload).await;

    assert_eq!(422, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["errors"]["status"], "The selected status is invalid.");
}

#[tokio::test]
async fn create_with_a_duplicate_email_returns_422() {
    let app = TestApp::spawn().await;

    let first = app
        .create_employee(&valid_payload("Alice Smith", "alice@example.com"))
        .await;
    assert_eq!(201, first.status().as_u16());

    let second = app
        .create_employee(&valid_payload("Other Alice", "alice@example.com"))
        .await;

    assert_eq!(422, second.status().as_u16());
    let body: serde_json::Value = second.json().await.expect("Failed to parse JSON");
    assert_eq!(body["errors"]["email"], "The email has already been taken.");
}

#[tokio::test]
async fn create_collects_errors_across_all_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .create_employee(&json!({
            "name": "a".repeat(101),
            "email": "nope",
            "salary": 100
        }))
        .await;

    assert_eq!(422, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["errors"]["name"],
        "The name field must not be greater than 100 characters."
    );
    assert!(body["errors"]["email"].as_str().is_some());
    assert!(body["errors"]["position"].as_str().is_some());
    assert!(body["errors"]["salary"].as_str().is_some());
}
