use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Deployment environment, read from `ENVIRONMENT`. Anything other than
/// `prod` counts as dev.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployEnv {
    Dev,
    Prod,
}

impl DeployEnv {
    pub fn detect() -> Self {
        match env::var("ENVIRONMENT").as_deref() {
            Ok("prod") => DeployEnv::Prod,
            _ => DeployEnv::Dev,
        }
    }

    pub fn is_prod(self) -> bool {
        self == DeployEnv::Prod
    }
}

/// Read a service setting from the environment. Production deployments must
/// set every variable explicitly; in dev the default applies when one is
/// unset.
pub fn get_env(key: &str, default: Option<&str>, env: DeployEnv) -> Result<String, AppError> {
    match std::env::var(key) {
        Ok(val) => Ok(val),
        Err(_) if env.is_prod() => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        Err(_) => default.map(str::to_string).ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
        }),
    }
}

/// `get_env` plus a parse into the target type, naming the offending key on
/// failure.
pub fn parse_env<T>(key: &str, default: &str, env: DeployEnv) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    get_env(key, Some(default), env)?
        .parse()
        .map_err(|e: T::Err| AppError::ConfigError(anyhow::anyhow!("{}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_falls_back_to_the_default() {
        let value = get_env("CONFIG_TEST_UNSET_DEV", Some("fallback"), DeployEnv::Dev)
            .expect("default applies in dev");
        assert_eq!(value, "fallback");
    }

    #[test]
    fn prod_requires_an_explicit_value() {
        let result = get_env("CONFIG_TEST_UNSET_PROD", Some("fallback"), DeployEnv::Prod);
        assert!(result.is_err());
    }

    #[test]
    fn missing_value_without_a_default_is_an_error() {
        let result = get_env("CONFIG_TEST_UNSET_NO_DEFAULT", None, DeployEnv::Dev);
        assert!(result.is_err());
    }
}
