use employee_service::config::{DatabaseBackend, EmployeeConfig};
use employee_service::startup::Application;
use serde_json::json;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut config = EmployeeConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.database.backend = DatabaseBackend::Memory;

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(app.run_until_stopped());

        let client = reqwest::Client::new();
        let address = format!("http://127.0.0.1:{}", port);

        // Wait for the server to answer the liveness route.
        let ping_url = format!("{}/ping", address);
        for _ in 0..50 {
            if client.get(&ping_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp { address, client }
    }

    pub async fn create_employee(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/employees", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self
            .client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let body = response.json().await.expect("Failed to parse JSON");
        (status, body)
    }
}

/// A payload that passes every validation rule.
pub fn valid_payload(name: &str, email: &str) -> serde_json::Value {
    json!({
        "name": name,
        "email": email,
        "position": "Engineer",
        "salary": 5_000_000
    })
}
