//! API configuration
//!
//! Values come from environment variables prefixed with `API_`, e.g.
//! `API_PORT=8080` or `API_DATABASE_URL=postgres://...`. Unset values fall
//! back to the defaults below.

use std::time::Duration as StdDuration;

use chrono::Duration;
use config::{ConfigError, Environment};
use serde::Deserialize;

use domain_policy::ScannerConfig;
use infra_db::DatabaseConfig;

/// Longest trailing window an expiration scan may examine
pub const MAX_EXPIRATION_WINDOW_SECS: u64 = 7 * 24 * 60 * 60;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// Log level, used when `RUST_LOG` is not set
    pub log_level: String,
    /// Seed the demo owners, cars and policies into an empty database
    pub seed_demo_data: bool,
    /// Pause between expiration scans
    pub expiration_check_interval_secs: u64,
    /// How far back each expiration scan looks
    pub expiration_window_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/car_insurance".to_string(),
            db_max_connections: 10,
            log_level: "info".to_string(),
            seed_demo_data: false,
            expiration_check_interval_secs: 55 * 60,
            expiration_window_secs: 60 * 60,
        }
    }
}

impl ApiConfig {
    /// Loads and validates configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("API"))
    }

    /// Loads and validates configuration from an environment source
    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config: ApiConfig = config::Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects scanner timings whose windows would not overlap
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expiration_check_interval_secs == 0 {
            return Err(ConfigError::Message(
                "expiration_check_interval_secs must be positive".to_string(),
            ));
        }
        if self.expiration_window_secs > MAX_EXPIRATION_WINDOW_SECS {
            return Err(ConfigError::Message(format!(
                "expiration_window_secs ({}) must not exceed {}",
                self.expiration_window_secs, MAX_EXPIRATION_WINDOW_SECS
            )));
        }
        if self.expiration_check_interval_secs >= self.expiration_window_secs {
            return Err(ConfigError::Message(format!(
                "expiration_check_interval_secs ({}) must be shorter than expiration_window_secs ({})",
                self.expiration_check_interval_secs, self.expiration_window_secs
            )));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url).max_connections(self.db_max_connections)
    }

    pub fn scanner_config(&self) -> Result<ScannerConfig, ConfigError> {
        let window = i64::try_from(self.expiration_window_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "expiration_window_secs ({}) is out of range",
                    self.expiration_window_secs
                ))
            })?;
        Ok(ScannerConfig::new(
            StdDuration::from_secs(self.expiration_check_interval_secs),
            window,
        ))
    }
}
