use serde::Deserialize;
use service_core::config as core_config;
use service_core::config::{get_env, parse_env, DeployEnv};
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Postgres,
    Memory,
}

impl EmployeeConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;

        let env = DeployEnv::detect();

        Ok(EmployeeConfig {
            common,
            database: DatabaseConfig {
                backend: get_env("DATABASE_BACKEND", Some("postgres"), env)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                url: get_env(
                    "DATABASE_URL",
                    Some("postgres://localhost:5432/employees"),
                    env,
                )?,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", "10", env)?,
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS", "1", env)?,
            },
        })
    }
}

impl std::str::FromStr for DatabaseBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" => Ok(DatabaseBackend::Postgres),
            "memory" => Ok(DatabaseBackend::Memory),
            _ => Err(format!("Invalid database backend: {}", s)),
        }
    }
}
