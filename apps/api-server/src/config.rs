//! Application configuration loaded from environment variables.

use std::env;

use inkwell_infra::DatabaseConfig;
use thiserror::Error;

use crate::middleware::allowed_hosts::AllowedHosts;

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported database scheme '{0}'; expected postgres or postgresql")]
    UnsupportedScheme(String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub allowed_hosts: AllowedHosts,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = match var("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                check_scheme(&url)?;
                let mut config = DatabaseConfig::new(url);
                if let Some(max) = var("DB_MAX_CONNECTIONS").and_then(|s| s.parse().ok()) {
                    config.max_connections = max;
                }
                if let Some(min) = var("DB_MIN_CONNECTIONS").and_then(|s| s.parse().ok()) {
                    config.min_connections = min;
                }
                Some(config)
            }
            None => None,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            database,
            allowed_hosts: AllowedHosts::parse(&var("ALLOWED_HOSTS").unwrap_or_default()),
        })
    }
}

/// Only PostgreSQL URLs are accepted; query parameters go to the driver as-is.
fn check_scheme(url: &str) -> Result<(), ConfigError> {
    let scheme = url.split_once("://").map(|(scheme, _)| scheme).unwrap_or("");
    match scheme {
        "postgres" | "postgresql" => Ok(()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
